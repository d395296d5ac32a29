//! Server timestamp parsing and chart label formatting
//!
//! The feeder service reports sample timestamps as strings, either in the
//! space-separated form `"YYYY-MM-DD HH:MM:SS"` or an ISO-like form with a
//! `T` separator and optional fractional seconds or offset.
//!
//! Convention: naive timestamps are interpreted as UTC wall time, and
//! offset-carrying timestamps are converted to UTC. The same UTC instant is
//! used for sorting and for label formatting, so ordering and display cannot
//! disagree.

use crate::error::{FeedError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Formats accepted for naive server timestamps, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Chart label format: date plus zero-padded 24-hour hour.
const LABEL_FORMAT: &str = "%Y-%m-%d %H";

/// Parse a server timestamp string into a UTC instant.
pub fn parse_server_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    // Offset-carrying ISO form, converted to UTC
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    Err(FeedError::Timestamp(format!(
        "unrecognized timestamp {trimmed:?}"
    )))
}

/// Format a UTC instant as a chart axis label.
pub fn chart_label(instant: DateTime<Utc>) -> String {
    instant.format(LABEL_FORMAT).to_string()
}

/// Epoch milliseconds for a UTC instant, as used in query strings.
pub fn epoch_ms(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}
