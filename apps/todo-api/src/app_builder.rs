//! # Todo API アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! ## ルーティング
//!
//! | パス | API キー |
//! |------|---------|
//! | `/health`, `/health/ready` | 不要 |
//! | `/api/*`（未定義のパスを含む） | 必要 |

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch},
};
use todoflow_domain::clock::Clock;
use todoflow_infra::repository::TodoRepository;
use todoflow_shared::observability::{MakeRequestSpan, MakeRequestUuidV7};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        ReadinessState,
        TodoState,
        create_todo,
        delete_todo,
        get_todo,
        health_check,
        list_todos,
        readiness_check,
        route_not_found,
        update_todo,
        update_todo_status,
    },
    middleware::{ApiKeyState, require_api_key},
    usecase::TodoUseCaseImpl,
};

/// ルーターを構築する
///
/// 初期化済みのリポジトリと時計を受け取り、State → Router の順に組み立てる。
pub fn build_app(
    api_key: &str,
    todo_repository: Arc<dyn TodoRepository>,
    clock: Arc<dyn Clock>,
) -> Router {
    let todo_state = Arc::new(TodoState {
        usecase: TodoUseCaseImpl::new(todo_repository.clone(), clock),
    });
    let readiness_state = Arc::new(ReadinessState { todo_repository });
    let api_key_state = ApiKeyState::new(api_key);

    // fallback にも API キー検証がかかるよう layer で包む
    let api = Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/{id}/status", patch(update_todo_status))
        .fallback(route_not_found)
        .layer(from_fn_with_state(api_key_state, require_api_key))
        .with_state(todo_state);

    // Request ID レイヤー（下に書いたものが外側）
    // 1. SetRequestIdLayer（最外）: UUID v7 を生成（クライアント提供値があればそれを使う）
    // 2. TraceLayer: スパンに request_id を含める
    // 3. PropagateRequestIdLayer: レスポンスヘッダーに x-request-id をコピー
    // 4. CorsLayer: 任意のオリジンを許可
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(MakeRequestSpan))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
