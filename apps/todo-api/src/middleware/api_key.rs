//! # API キー検証ミドルウェア
//!
//! `x-api-key` ヘッダーを設定済みの共有シークレットと照合する。
//!
//! - ヘッダーなし、または空 → 401
//! - 値が一致しない → 403
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! Router::new()
//!     .route("/todos", get(list_todos))
//!     .layer(from_fn_with_state(ApiKeyState::new(api_key), require_api_key))
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::error::ApiError;

/// API キーを運ぶヘッダー名
pub const API_KEY_HEADER: &str = "x-api-key";

/// API キー検証ミドルウェアの状態
#[derive(Clone)]
pub struct ApiKeyState {
    api_key: Arc<str>,
}

impl ApiKeyState {
    pub fn new(api_key: impl Into<Arc<str>>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// 定数時間で比較する
    fn matches(&self, provided: &[u8]) -> bool {
        self.api_key.as_bytes().ct_eq(provided).into()
    }
}

/// API キー検証ミドルウェア
pub async fn require_api_key(
    State(state): State<ApiKeyState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|value| value.as_bytes())
        .filter(|value| !value.is_empty());

    let Some(provided) = provided else {
        tracing::warn!(
            method = %request.method(),
            uri = %request.uri(),
            "API キーが指定されていません"
        );
        return ApiError::ApiKeyMissing.into_response();
    };

    if !state.matches(provided) {
        tracing::warn!(
            method = %request.method(),
            uri = %request.uri(),
            "API キーが一致しません"
        );
        return ApiError::ApiKeyInvalid.into_response();
    }

    next.run(request).await
}
