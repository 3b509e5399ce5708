//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//!
//! ## 使用例
//!
//! ```rust
//! use todoflow_domain::DomainError;
//!
//! fn validate_title(title: &str) -> Result<(), DomainError> {
//!     if title.trim().is_empty() {
//!         return Err(DomainError::Validation("todo_title: Title is required".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、統一エンベロープの HTTP レスポンスに変換する。
/// `Validation` のメッセージはそのままクライアントに返されるため、
/// 入力フィールド名（`todo_title` など）を含めて具体的に書く。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 必須フィールドが未入力
    /// - 列挙値以外のステータス
    /// - 解釈できない日付
    #[error("{0}")]
    Validation(String),
}
