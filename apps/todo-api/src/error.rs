//! # Todo API エラー定義
//!
//! ユースケース層のエラーと、HTTP レスポンス（統一エンベロープ）への変換を定義する。
//!
//! ## 変換規則
//!
//! | 発生源 | 読み取り系 | 書き込み系 |
//! |--------|-----------|-----------|
//! | 対象なし | 404 `Todo not found` | 404 `Todo not found` |
//! | 入力検証 | - | 400 `Failed to ...` + `error` |
//! | ストア | 500 `Server Error` + `error` | 400 `Failed to ...` + `error` |
//!
//! 読み取り系か書き込み系かはハンドラが [`ApiError::read`] / [`ApiError::write`]
//! を選ぶことで決まる。

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todoflow_domain::DomainError;
use todoflow_infra::{InfraError, InfraErrorKind};
use todoflow_shared::api_envelope::FailureEnvelope;

/// ユースケース層で発生するエラー
#[derive(Debug, Error)]
pub enum TodoUseCaseError {
    /// 対象の Todo が存在しない
    #[error("Todo not found")]
    NotFound,

    /// 入力の検証に失敗
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// ストアの操作に失敗
    #[error(transparent)]
    Store(#[from] InfraError),
}

/// 書き込み系の操作
///
/// 成功・失敗時のメッセージを決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Update,
    UpdateStatus,
    Delete,
}

impl WriteAction {
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Create => "Todo created successfully",
            Self::Update => "Todo updated successfully",
            Self::UpdateStatus => "Status updated successfully",
            Self::Delete => "Todo deleted successfully",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Failed to create todo",
            Self::Update => "Failed to update todo",
            Self::UpdateStatus => "Failed to update status",
            Self::Delete => "Failed to delete todo",
        }
    }
}

/// HTTP レスポンスに変換されるエラー
///
/// `Display` がそのままエンベロープの `message` になる。
#[derive(Debug, Error)]
pub enum ApiError {
    /// `x-api-key` ヘッダーがない
    #[error("API key is required. Add x-api-key header.")]
    ApiKeyMissing,

    /// `x-api-key` ヘッダーが設定値と一致しない
    #[error("Invalid API key.")]
    ApiKeyInvalid,

    /// 対象の Todo が存在しない
    #[error("Todo not found")]
    TodoNotFound,

    /// ステータス更新で列挙値以外が指定された
    #[error("Invalid status. Must be: pending, in_progress, completed, or cancelled")]
    InvalidStatus,

    /// ルートが存在しない
    #[error("Route not found")]
    RouteNotFound,

    /// 読み取り系の失敗
    #[error("Server Error")]
    ServerError(String),

    /// 書き込み系の失敗
    #[error("{}", .action.failure_message())]
    OperationFailed { action: WriteAction, detail: String },
}

impl ApiError {
    /// 読み取り系ハンドラのエラーに変換する
    pub fn read(err: TodoUseCaseError) -> Self {
        match err {
            TodoUseCaseError::NotFound => Self::TodoNotFound,
            TodoUseCaseError::Validation(e) => Self::ServerError(e.to_string()),
            TodoUseCaseError::Store(e) => {
                log_store_error(&e);
                Self::ServerError(store_detail(&e))
            }
        }
    }

    /// 書き込み系ハンドラのエラーに変換する
    pub fn write(action: WriteAction, err: TodoUseCaseError) -> Self {
        match err {
            TodoUseCaseError::NotFound => Self::TodoNotFound,
            TodoUseCaseError::Validation(e) => Self::OperationFailed {
                action,
                detail: e.to_string(),
            },
            TodoUseCaseError::Store(e) => {
                log_store_error(&e);
                Self::OperationFailed {
                    action,
                    detail: store_detail(&e),
                }
            }
        }
    }

    /// リクエストボディを JSON として読めなかった
    pub fn malformed_body(action: WriteAction, rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "リクエストボディの解析に失敗しました");
        Self::OperationFailed {
            action,
            detail: rejection.body_text(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::ApiKeyMissing => StatusCode::UNAUTHORIZED,
            Self::ApiKeyInvalid => StatusCode::FORBIDDEN,
            Self::TodoNotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::InvalidStatus | Self::OperationFailed { .. } => StatusCode::BAD_REQUEST,
            Self::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let envelope = FailureEnvelope::failure(self.to_string());
        let envelope = match self {
            Self::ServerError(detail) | Self::OperationFailed { detail, .. } => {
                envelope.with_error(detail)
            }
            _ => envelope,
        };

        (status, Json(envelope)).into_response()
    }
}

/// クライアントに返すストアエラーの詳細
fn store_detail(err: &InfraError) -> String {
    match err.kind() {
        InfraErrorKind::Database(source) => source.to_string(),
        InfraErrorKind::InvalidInput(msg) | InfraErrorKind::Unexpected(msg) => msg.clone(),
    }
}

fn log_store_error(err: &InfraError) {
    if err.is_invalid_input() {
        tracing::warn!(error = %err, "不正な入力でストア操作が失敗しました");
    } else {
        tracing::error!(
            error = %err,
            span_trace = %err.span_trace(),
            "ストア操作が失敗しました"
        );
    }
}
