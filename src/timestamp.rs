use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

use crate::patterns::TRAILING_OFFSET;

/// Templates tried when a format has no convention of its own
pub const DEFAULT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%d/%b/%Y:%H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

pub const WEB_ACCESS_FORMATS: &[&str] = &["%d/%b/%Y:%H:%M:%S %z"];
pub const CONTAINER_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.fZ"];
pub const PROXY_ERROR_FORMATS: &[&str] = &["%Y/%m/%d %H:%M:%S"];
const SYSLOG_FORMATS: &[&str] = &["%Y %b %d %H:%M:%S"];

/// Parse `input` with the first template that accepts it.
///
/// Templates carrying `%z` produce offset-aware values converted to UTC;
/// everything else is read as UTC wall time. As a last resort a trailing
/// `±HHMM` offset is dropped and the common-log layout retried.
pub fn parse_timestamp(input: &str, formats: &[&str]) -> Option<DateTime<Utc>> {
    let input = input.trim();

    for format in formats {
        if let Some(dt) = parse_with(input, format) {
            return Some(dt);
        }
    }

    let without_offset = TRAILING_OFFSET.replace(input, "");
    NaiveDateTime::parse_from_str(&without_offset, "%d/%b/%Y:%H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Syslog stamps carry no year; the current one is assumed
pub fn parse_syslog_timestamp(input: &str) -> Option<DateTime<Utc>> {
    parse_syslog_timestamp_in_year(input, Utc::now().year())
}

pub fn parse_syslog_timestamp_in_year(input: &str, year: i32) -> Option<DateTime<Utc>> {
    parse_timestamp(&format!("{} {}", year, input.trim()), SYSLOG_FORMATS)
}

fn parse_with(input: &str, format: &str) -> Option<DateTime<Utc>> {
    if format.contains("%z") {
        DateTime::parse_from_str(input, format)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    } else {
        NaiveDateTime::parse_from_str(input, format)
            .ok()
            .map(|dt| dt.and_utc())
    }
}
