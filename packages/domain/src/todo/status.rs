//! # Todo ステータス

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::DomainError;

/// Todo の進捗状態
///
/// 文字列表現（ストア・JSON）は snake_case。
/// この 4 値以外はどの経路からも受け付けない。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TodoStatus {
    /// 未着手
    #[default]
    Pending,
    /// 作業中
    InProgress,
    /// 完了
    Completed,
    /// 取り消し
    Cancelled,
}

impl TodoStatus {
    /// ストア・JSON で使う文字列表現
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::str::FromStr for TodoStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::Validation(format!(
                "todo_status: `{s}` is not a valid status (expected one of: pending, in_progress, \
                 completed, cancelled)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("pending", TodoStatus::Pending)]
    #[case("in_progress", TodoStatus::InProgress)]
    #[case("completed", TodoStatus::Completed)]
    #[case("cancelled", TodoStatus::Cancelled)]
    fn test_定義済みの文字列をパースできる(#[case] input: &str, #[case] expected: TodoStatus) {
        assert_eq!(TodoStatus::from_str(input).unwrap(), expected);
        assert_eq!(expected.as_str(), input);
        assert_eq!(expected.to_string(), input);
    }

    #[rstest]
    #[case("done")]
    #[case("Pending")]
    #[case("in-progress")]
    #[case("")]
    #[case(" pending")]
    fn test_定義外の文字列はバリデーションエラー(#[case] input: &str) {
        let err = TodoStatus::from_str(input).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.starts_with("todo_status:")));
    }

    #[test]
    fn test_デフォルトはpending() {
        assert_eq!(TodoStatus::default(), TodoStatus::Pending);
    }

    #[test]
    fn test_serdeはsnake_caseで入出力する() {
        assert_eq!(
            serde_json::to_value(TodoStatus::InProgress).unwrap(),
            serde_json::json!("in_progress")
        );
        let status: TodoStatus = serde_json::from_str(r#""cancelled""#).unwrap();
        assert_eq!(status, TodoStatus::Cancelled);
    }
}
