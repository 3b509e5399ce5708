//! # リポジトリ実装
//!
//! 永続化のインターフェース（トレイト）と MongoDB による具体実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイトにのみ依存する
//! - **ストア抽象化**: BSON 表現と ObjectId の扱いをこの層に閉じ込める
//! - **テスタビリティ**: トレイト経由でインメモリ実装に差し替え可能

pub mod todo_repository;

pub use todo_repository::{MongoTodoRepository, TodoRepository};
