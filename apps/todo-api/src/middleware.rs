//! # ミドルウェア

pub mod api_key;

pub use api_key::{ApiKeyState, require_api_key};
