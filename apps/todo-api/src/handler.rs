//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、検証はドメイン層、永続化はユースケース経由でリポジトリに委譲

pub mod health;
pub mod todo;

pub use health::{ReadinessState, health_check, readiness_check};
pub use todo::{
    TodoState,
    create_todo,
    delete_todo,
    get_todo,
    list_todos,
    route_not_found,
    update_todo,
    update_todo_status,
};
