//! # MongoDB 接続管理
//!
//! クライアントの作成と疎通確認を行う。
//!
//! `mongodb::Client` は内部に接続プールを持つ `Clone` 可能なハンドルなので、
//! アプリケーション起動時に一度だけ作成し、[`Database`] を各リポジトリで共有する。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todoflow_infra::db;
//!
//! let database = db::connect("mongodb://localhost:27017", "todo_app").await?;
//! db::ping(&database).await?;
//! ```

use mongodb::{Client, Database, bson::doc};

use crate::error::InfraError;

/// 接続文字列とデータベース名から [`Database`] ハンドルを作成する
///
/// クライアントの作成はサーバーへの接続を待たない。
/// 到達性を確認したい場合は続けて [`ping`] を呼ぶ。
#[tracing::instrument(skip_all, fields(%database_name))]
pub async fn connect(uri: &str, database_name: &str) -> Result<Database, InfraError> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client.database(database_name))
}

/// サーバーに `ping` コマンドを送り、到達できるか確認する
#[tracing::instrument(skip_all, level = "debug")]
pub async fn ping(database: &Database) -> Result<(), InfraError> {
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
