//! # ローカル時刻表示
//!
//! 保存されている UTC の日時を、サービスの表示用タイムゾーン
//! （固定オフセット UTC+05:30）の文字列に変換する。
//!
//! ## 設計方針
//!
//! - ストアには常に UTC の瞬間（instant）を保存する
//! - タイムゾーン変換はレスポンス境界でのみ行う（純粋関数）
//! - 夏時間のない固定オフセットなので `chrono-tz` は使わない
//!
//! ## 表示形式
//!
//! `DD/MM/YYYY HH:MM:SS`（24 時間表記）
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use todoflow_shared::local_time::format_local;
//!
//! let instant = Utc.with_ymd_and_hms(2026, 10, 17, 3, 0, 0).unwrap();
//! assert_eq!(format_local(&instant), "17/10/2026 08:30:00");
//! ```

use chrono::{DateTime, FixedOffset, Utc};

/// 表示用タイムゾーンの UTC からのオフセット（秒）
pub const LOCAL_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

/// 表示形式（`chrono::format::strftime`）
const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// 表示用タイムゾーン（コンパイル時に検証済み）
const LOCAL_OFFSET: FixedOffset = match FixedOffset::east_opt(LOCAL_OFFSET_SECONDS) {
    Some(offset) => offset,
    None => panic!("LOCAL_OFFSET_SECONDS は ±24 時間未満であること"),
};

/// 表示用タイムゾーンのオフセットを返す
pub fn local_offset() -> FixedOffset {
    LOCAL_OFFSET
}

/// UTC の日時を表示用ローカル時刻の文字列に変換する
pub fn format_local(instant: &DateTime<Utc>) -> String {
    instant
        .with_timezone(&local_offset())
        .format(DISPLAY_FORMAT)
        .to_string()
}
