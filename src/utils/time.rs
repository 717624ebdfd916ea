//! Timestamp parsing and formatting for CLI input/output.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};

/// Local-time layouts accepted besides RFC 3339.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse an RFC 3339 timestamp, or a `YYYY-MM-DD HH:MM[:SS]` wall-clock time
/// in the local time zone.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts);
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))?;

    // Skipped or repeated local times (DST changes) are rejected.
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|ts| ts.fixed_offset())
        .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))
}

/// `YYYY-MM-DD HH:MM` as written, offset dropped.
pub fn format_wall_clock(ts: &DateTime<FixedOffset>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}
