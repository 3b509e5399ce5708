//! # Todoflow インフラ層
//!
//! 外部システム（MongoDB）との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトとその具体的な実装を提供する。
//! ドキュメントストアの詳細（BSON 表現、ObjectId、コレクション名）をカプセル化し、
//! ドメイン層・API 層をストアの変更から保護する。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain → shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - MongoDB 接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと MongoDB 実装
//! - `mock` - テスト用インメモリ実装（feature `test-utils`）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todoflow_infra::{db, repository::MongoTodoRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let database = db::connect("mongodb://localhost:27017", "todo_app").await?;
//!     let repository = MongoTodoRepository::new(&database);
//!     repository.ensure_indexes().await?;
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(feature = "test-utils")]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
