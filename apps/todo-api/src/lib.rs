//! # Todo API ライブラリ
//!
//! API キーで保護された Todo 管理 API のコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: ユースケース・HTTP のエラー定義
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（API キー検証）
//! - `usecase`: ユースケース

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;

pub use app_builder::build_app;
pub use config::ApiConfig;
