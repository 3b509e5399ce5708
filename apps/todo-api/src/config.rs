//! # Todo API 設定
//!
//! 環境変数から Todo API サーバーの設定を読み込む。
//!
//! 起動時に一度だけ [`ApiConfig::from_env`] を呼び、以後は値として引き回す。
//! 必須の値が欠けている場合はサーバーを起動しない。

use std::fmt;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE: &str = "todo_app";

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定、または空
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値の形式が不正
    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Todo API サーバーの設定
#[derive(Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:             String,
    /// ポート番号
    pub port:             u16,
    /// `x-api-key` ヘッダーと照合する共有シークレット
    pub api_key:          String,
    /// MongoDB 接続文字列
    pub mongodb_uri:      String,
    /// データベース名
    pub mongodb_database: String,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// プロセスの環境変数に触れずにテストするための入口。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match non_empty("TODO_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name:  "TODO_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: non_empty("TODO_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            api_key: non_empty("API_KEY").ok_or(ConfigError::Missing("API_KEY"))?,
            mongodb_uri: non_empty("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?,
            mongodb_database: non_empty("MONGODB_DATABASE")
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        })
    }
}

// シークレットをログに出さない
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &"<redacted>")
            .field("mongodb_uri", &"<redacted>")
            .field("mongodb_database", &self.mongodb_database)
            .finish()
    }
}
