//! # ヘルスチェック共通型
//!
//! ヘルスチェック（`GET /health`）と Readiness チェック（`GET /health/ready`）の
//! レスポンス型を提供する。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// プロセスが稼働していることだけを示す。依存サービスは確認しない。
///
/// ## 使用例
///
/// ```
/// use todoflow_shared::HealthResponse;
///
/// let response = HealthResponse::running();
/// assert_eq!(response.status, "ok");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（常に `"ok"`）
    pub status:  String,
    /// 人間向けメッセージ
    pub message: String,
}

impl HealthResponse {
    /// 稼働中を表すレスポンスを作成する
    pub fn running() -> Self {
        Self {
            status:  "ok".to_string(),
            message: "Server is running".to_string(),
        }
    }
}

/// 個別チェックの結果ステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// チェック成功
    Ok,
    /// チェック失敗
    Error,
}

/// Readiness 全体のステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    /// 全依存サービスが利用可能
    Ready,
    /// 一部の依存サービスが利用不可
    NotReady,
}

/// Readiness Check レスポンス
///
/// `status` は全体のステータス、`checks` は個別チェック結果を示す。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// 全体のステータス
    pub status: ReadinessStatus,
    /// 個別チェック結果（キー: チェック名、値: ステータス）
    pub checks: HashMap<String, CheckStatus>,
}

impl ReadinessResponse {
    /// 個別チェック結果から全体のステータスを導出する
    ///
    /// すべて `Ok` なら `Ready`、1 つでも `Error` があれば `NotReady`。
    pub fn from_checks(checks: HashMap<String, CheckStatus>) -> Self {
        let status = if checks.values().all(|c| *c == CheckStatus::Ok) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };
        Self { status, checks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_responseのserializeで正しいjson形状にする() {
        let json = serde_json::to_value(HealthResponse::running()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": "ok",
                "message": "Server is running"
            })
        );
    }

    #[test]
    fn test_check_statusのserialize結果() {
        assert_eq!(
            serde_json::to_value(CheckStatus::Ok).unwrap(),
            serde_json::json!("ok")
        );
        assert_eq!(
            serde_json::to_value(CheckStatus::Error).unwrap(),
            serde_json::json!("error")
        );
    }

    #[test]
    fn test_全チェック成功ならreadyになる() {
        let mut checks = HashMap::new();
        checks.insert("database".to_string(), CheckStatus::Ok);

        let response = ReadinessResponse::from_checks(checks);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "ready");
        assert_eq!(json["checks"]["database"], "ok");
    }

    #[test]
    fn test_失敗チェックがあればnot_readyになる() {
        let mut checks = HashMap::new();
        checks.insert("database".to_string(), CheckStatus::Error);

        let response = ReadinessResponse::from_checks(checks);

        assert_eq!(response.status, ReadinessStatus::NotReady);
        assert_eq!(
            serde_json::to_value(&response).unwrap()["status"],
            "not_ready"
        );
    }
}
