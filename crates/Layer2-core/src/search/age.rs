//! 파일 갱신 시점 판정

use chrono::{DateTime, Duration, Utc};

/// RFC 3339 시각 파싱 (빈 문자열이나 형식 오류는 None)
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `updated_at` 이 `now` 기준 `stale_after_days` 일보다 오래됐는지
///
/// 시각을 알 수 없으면 오래되지 않은 것으로 본다.
pub fn is_stale(updated_at: &str, now: DateTime<Utc>, stale_after_days: i64) -> bool {
    parse_timestamp(updated_at)
        .map(|updated| updated < now - Duration::days(stale_after_days))
        .unwrap_or(false)
}
