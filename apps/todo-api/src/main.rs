//! # Todo API サーバー
//!
//! API キーで保護された Todo 管理 API。データは MongoDB に保存する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_KEY` | **Yes** | `x-api-key` ヘッダーと照合する共有シークレット |
//! | `MONGODB_URI` | **Yes** | MongoDB 接続文字列 |
//! | `MONGODB_DATABASE` | No | データベース名（デフォルト: `todo_app`） |
//! | `TODO_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `TODO_PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! API_KEY=secret MONGODB_URI=mongodb://localhost:27017 cargo run -p todoflow-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use todoflow_api::{ApiConfig, build_app};
use todoflow_domain::clock::SystemClock;
use todoflow_infra::{db, repository::MongoTodoRepository};
use todoflow_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Todo API サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. 設定の読み込み
/// 4. MongoDB への接続とインデックスの作成
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("todo-api");
    init_tracing(&tracing_config);
    let _tracing_guard =
        tracing::info_span!("app", service = %tracing_config.service_name).entered();

    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::info!(service = %tracing_config.service_name, ?config, "Todo API サーバーを起動します");

    let database = db::connect(&config.mongodb_uri, &config.mongodb_database)
        .await
        .context("MongoDB への接続に失敗しました")?;
    let todo_repository = MongoTodoRepository::new(&database);
    todo_repository
        .ensure_indexes()
        .await
        .context("インデックスの作成に失敗しました")?;
    tracing::info!(database = %config.mongodb_database, "MongoDB に接続しました");

    let app = build_app(
        &config.api_key,
        Arc::new(todo_repository),
        Arc::new(SystemClock),
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Todo API サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Ctrl+C で停止する
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "シグナルの待ち受けに失敗しました");
    }
    tracing::info!("Todo API サーバーを停止します");
}
