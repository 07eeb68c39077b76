//! Time range resolution for historical-trade queries
//!
//! MetaStats expects `YYYY-MM-DD HH:MM:SS.mmm` strings. Caller-supplied values
//! are forwarded verbatim; only the defaults are produced here.

use chrono::{DateTime, Utc};

/// Beginning of the account history
pub const DEFAULT_HISTORY_START: &str = "2025-01-01 00:00:00.000";

/// Wire format of MetaStats time strings (millisecond precision)
pub const UPSTREAM_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Fully resolved query window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start_time: String,
    pub end_time: String,
}

/// Format an instant the way MetaStats expects it
pub fn format_upstream_time(at: DateTime<Utc>) -> String {
    at.format(UPSTREAM_TIME_FORMAT).to_string()
}

/// Fill in missing bounds.
///
/// An absent or empty `start` becomes `anchor`, an absent or empty `end`
/// becomes `now`.
pub fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    anchor: &str,
    now: DateTime<Utc>,
) -> TimeRange {
    let start_time = match start {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => anchor.to_string(),
    };
    let end_time = match end {
        Some(e) if !e.is_empty() => e.to_string(),
        _ => format_upstream_time(now),
    };
    TimeRange {
        start_time,
        end_time,
    }
}
