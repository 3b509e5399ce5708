//! # 期日の入力解釈
//!
//! `todo_date` として受け取った値を UTC の瞬間に変換する。
//!
//! 数値は UNIX エポックからのミリ秒として扱う。文字列で受け付ける形式:
//!
//! | 形式 | 例 | 解釈 |
//! |------|----|------|
//! | RFC 3339 | `2026-10-17T09:00:00Z`, `2026-10-17T09:00:00+05:30` | 記載どおりのオフセット |
//! | オフセットなし日時 | `2026-10-17T09:00:00`, `2026-10-17 09:00` | 表示用タイムゾーン（UTC+05:30） |
//! | 日付のみ | `2026-10-17` | 表示用タイムゾーンの 0 時 |

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use todoflow_shared::local_time::local_offset;

use crate::DomainError;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `todo_date` として受け取った未解釈の値
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DueDateInput {
    /// 日時文字列
    Text(String),
    /// UNIX エポックからのミリ秒
    EpochMillis(i64),
}

impl DueDateInput {
    /// UTC の日時に変換する
    pub fn resolve(&self) -> Result<DateTime<Utc>, DomainError> {
        match self {
            Self::Text(raw) => parse_due_date(raw),
            Self::EpochMillis(millis) => DateTime::from_timestamp_millis(*millis)
                .ok_or_else(|| invalid_date(&millis.to_string())),
        }
    }
}

impl From<&str> for DueDateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for DueDateInput {
    fn from(value: i64) -> Self {
        Self::EpochMillis(value)
    }
}

fn invalid_date(input: &str) -> DomainError {
    DomainError::Validation(format!("todo_date: invalid date \"{input}\""))
}

/// 期日文字列を UTC の日時に変換する
pub fn parse_due_date(input: &str) -> Result<DateTime<Utc>, DomainError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        });

    naive
        .and_then(|naive| local_offset().from_local_datetime(&naive).single())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| invalid_date(input))
}
