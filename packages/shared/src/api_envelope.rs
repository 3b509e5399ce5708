//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式
//! `{ "success": bool, "message"?, "count"?, "data"?, "error"? }` を提供する。
//!
//! 成功・失敗のどちらも同じ形で返すため、クライアントは `success` を見るだけで
//! 結果を判定できる。値を持たないフィールドは JSON に出力しない。

use serde::{Deserialize, Serialize};

/// 公開 API の統一レスポンス型
///
/// この型は以下の場所で使用される:
/// - Todo API ハンドラ（成功レスポンス）
/// - `ApiError` の `IntoResponse` 実装（失敗レスポンス）
/// - API キーゲート（401 / 403）
///
/// ## 使用例
///
/// ```
/// use todoflow_shared::ApiEnvelope;
///
/// let response = ApiEnvelope::data(vec!["a", "b"]).with_count(2);
/// assert!(response.success);
/// assert_eq!(response.count, Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count:   Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data:    Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:   Option<String>,
}

/// データを持たない失敗レスポンス
pub type FailureEnvelope = ApiEnvelope<()>;

impl<T> ApiEnvelope<T> {
    /// データ付きの成功レスポンスを作成する
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count:   None,
            data:    Some(data),
            error:   None,
        }
    }

    /// 失敗レスポンスを作成する
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            count:   None,
            data:    None,
            error:   None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// 失敗の詳細（下位層のエラーメッセージ）を付与する
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
