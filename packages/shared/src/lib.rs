//! # Todoflow 共有ユーティリティ
//!
//! このクレートは、Todoflow
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, api）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える
//!
//! ## モジュール構成
//!
//! - [`api_envelope`] - 公開 API の統一レスポンスエンベロープ
//! - [`health`] - ヘルスチェック / Readiness チェックのレスポンス型
//! - [`local_time`] - 固定オフセット（UTC+05:30）での日時表示
//! - [`observability`] - トレーシング初期化と Request ID（`observability` feature）

pub mod api_envelope;
pub mod health;
pub mod local_time;
pub mod observability;

pub use api_envelope::ApiEnvelope;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
