//! Date/time utilities for GYMDESK.
//!
//! Database timestamps are stored as UTC text (`YYYY-MM-DD HH:MM:SS`); these
//! helpers convert them to the studio's local timezone for display and to
//! RFC3339 for API responses.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Format a datetime string (stored as UTC) to the specified timezone.
///
/// Accepts RFC3339 or the SQLite `YYYY-MM-DD HH:MM:SS` format. Returns the
/// original string unchanged if parsing fails.
pub fn format_datetime(datetime_str: &str, timezone: &str, format: &str) -> String {
    let tz: Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => return datetime_str.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        let local_dt = dt.with_timezone(&Utc).with_timezone(&tz);
        return local_dt.format(format).to_string();
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S") {
        let local_dt = naive.and_utc().with_timezone(&tz);
        return local_dt.format(format).to_string();
    }

    datetime_str.to_string()
}

/// Format a datetime string with the default display format.
pub fn format_datetime_default(datetime_str: &str, timezone: &str) -> String {
    format_datetime(datetime_str, timezone, "%Y/%m/%d %H:%M")
}

/// Current wall-clock time in the given timezone.
///
/// Falls back to UTC when the timezone name does not parse. Report period
/// boundaries are computed against this "now".
pub fn now_in_timezone(timezone: &str) -> NaiveDateTime {
    match timezone.parse::<Tz>() {
        Ok(tz) => Utc::now().with_timezone(&tz).naive_local(),
        Err(_) => Utc::now().naive_utc(),
    }
}

/// Convert a database datetime string (`YYYY-MM-DD HH:MM:SS`) to RFC3339.
///
/// The database stores times in UTC, so this appends 'Z'.
pub fn to_rfc3339(datetime_str: &str) -> String {
    format!("{}Z", datetime_str.replace(' ', "T"))
}

/// Parse a database datetime string into a `NaiveDateTime`.
///
/// Accepts the SQLite text format and, for records written by external
/// tooling, RFC3339 (offset discarded after conversion to UTC).
pub fn parse_db_datetime(datetime_str: &str) -> Option<NaiveDateTime> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S") {
        return Some(naive);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    None
}
