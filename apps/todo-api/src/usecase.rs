//! # ユースケース層
//!
//! ハンドラから呼ばれるアプリケーションロジックを定義する。
//! 入力の検証はドメイン層、永続化はリポジトリに委譲する。

pub mod todo;

pub use todo::TodoUseCaseImpl;
