//! Timestamp handling
//!
//! Gateways are inconsistent about timestamps: some send RFC 3339 with an
//! offset, some send naive local times, a few send only a date. The pipeline
//! only needs the hour of day, read in whatever clock the gateway used. An
//! offset is never converted to UTC, because the hour is a proxy for the
//! hospital's daily routine.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

use crate::constants::DEFAULT_HOUR_OF_DAY;

/// Naive layouts tried after RFC 3339, once any zone designator is removed
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Where an hour of day came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourSource {
    /// Read from the record's timestamp
    Parsed,
    /// Timestamp missing or unreadable, default used
    Default,
}

/// Parse the hour of day out of an ISO-8601 timestamp
pub fn parse_hour(timestamp: &str) -> Option<u32> {
    let ts = timestamp.trim();
    if ts.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.hour());
    }

    let local = strip_zone(ts);
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(local, fmt) {
            return Some(dt.hour());
        }
    }

    // Bare date: midnight
    NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok().map(|_| 0)
}

/// Drop a trailing `Z` or `±HH`, `±HHMM`, `±HH:MM` offset from a timestamp
/// that has a time part; the remaining wall-clock time is the local time.
fn strip_zone(ts: &str) -> &str {
    let Some(time_start) = ts.find(['T', ' ']) else {
        return ts;
    };

    if let Some(rest) = ts.strip_suffix(['Z', 'z']) {
        return rest.trim_end();
    }

    let Some(sign) = ts[time_start..].rfind(['+', '-']).map(|i| time_start + i) else {
        return ts;
    };
    let offset = ts[sign + 1..].as_bytes();
    let is_offset = match offset {
        [h1, h2] => h1.is_ascii_digit() && h2.is_ascii_digit(),
        [h1, h2, m1, m2] => [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit()),
        [h1, h2, b':', m1, m2] => [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit()),
        _ => false,
    };

    if is_offset {
        ts[..sign].trim_end()
    } else {
        ts
    }
}

/// Total variant of [`parse_hour`]: missing or unparseable input yields
/// [`DEFAULT_HOUR_OF_DAY`]
pub fn hour_of_day(timestamp: Option<&str>) -> (u32, HourSource) {
    match timestamp.and_then(parse_hour) {
        Some(hour) => (hour, HourSource::Parsed),
        None => (DEFAULT_HOUR_OF_DAY, HourSource::Default),
    }
}
