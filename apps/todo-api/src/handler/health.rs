//! # ヘルスチェックハンドラ
//!
//! - `/health` - Liveness Check（常に `"ok"` を返す）
//! - `/health/ready` - Readiness Check（ストアへの ping）
//!
//! どちらも API キー不要。

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use todoflow_infra::repository::TodoRepository;
use todoflow_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

const STORE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::running())
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub todo_repository: Arc<dyn TodoRepository>,
}

/// Readiness Check エンドポイント
///
/// ストアに到達できれば 200、できなければ 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let mut checks = HashMap::new();
    checks.insert(
        "database".to_string(),
        check_store(state.todo_repository.as_ref()).await,
    );

    let response = ReadinessResponse::from_checks(checks);
    let http_status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    (http_status, Json(response))
}

/// ストアへの接続を ping で確認する（タイムアウト: 5 秒）
async fn check_store(repository: &dyn TodoRepository) -> CheckStatus {
    match tokio::time::timeout(STORE_CHECK_TIMEOUT, repository.ping()).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: store ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: store check timed out");
            CheckStatus::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::Request,
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use todoflow_infra::mock::{FailingTodoRepository, InMemoryTodoRepository};
    use tower::ServiceExt;

    use super::*;

    fn create_test_app(todo_repository: Arc<dyn TodoRepository>) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .merge(
                Router::new()
                    .route("/health/ready", get(readiness_check))
                    .with_state(Arc::new(ReadinessState { todo_repository })),
            )
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_ヘルスチェックは稼働中を返す() {
        let sut = create_test_app(Arc::new(InMemoryTodoRepository::new()));

        let (status, body) = get_json(sut, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok", "message": "Server is running" }));
    }

    #[tokio::test]
    async fn test_ストアに到達できればready() {
        let sut = create_test_app(Arc::new(InMemoryTodoRepository::new()));

        let (status, body) = get_json(sut, "/health/ready").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "status": "ready", "checks": { "database": "ok" } })
        );
    }

    #[tokio::test]
    async fn test_ストア障害は503とnot_ready() {
        let sut = create_test_app(Arc::new(FailingTodoRepository));

        let (status, body) = get_json(sut, "/health/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body,
            json!({ "status": "not_ready", "checks": { "database": "error" } })
        );
    }
}
