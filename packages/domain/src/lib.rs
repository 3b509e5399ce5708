//! # Todoflow ドメイン層
//!
//! Todo リソースのドメインモデルと、その検証ルールを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`todo::Todo`]）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（[`todo::TodoTitle`],
//!   [`todo::TodoStatus`]）
//! - **検証関数**: 作成・更新の両方で同じ検証を通す（[`todo::TodoChanges`],
//!   [`todo::NewTodo`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain → shared
//! ```
//!
//! ドメイン層はストア（MongoDB）のクライアントには一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`clock`] - 現在時刻の抽象化
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`todo`] - Todo エンティティと値オブジェクト
//!
//! ## 使用例
//!
//! ```rust
//! use todoflow_domain::todo::{TodoInput, TodoStatus, NewTodo};
//!
//! let now = chrono::Utc::now();
//! let new_todo = NewTodo::validate(
//!     TodoInput {
//!         title: Some("Buy milk".to_string()),
//!         ..TodoInput::default()
//!     },
//!     now,
//! )
//! .unwrap();
//!
//! assert_eq!(new_todo.status, TodoStatus::Pending);
//! assert_eq!(new_todo.description, "");
//! ```

pub mod clock;
pub mod error;
pub mod todo;

pub use error::DomainError;
