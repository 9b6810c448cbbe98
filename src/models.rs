use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::formats::LogFormat;

/// Severity label attached to every entry.
///
/// The set is open: labels outside the well-known ones are kept verbatim
/// (upper-cased) in `Other`, e.g. nginx's `notice` or `crit`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Other(String),
}

impl LogLevel {
    /// Normalize a raw label, case-insensitive.
    /// `WARNING` folds into `Warn` and `CRITICAL` into `Fatal`.
    pub fn from_label(label: &str) -> LogLevel {
        let upper = label.trim().to_uppercase();
        match upper.as_str() {
            "TRACE" => LogLevel::Trace,
            "DEBUG" => LogLevel::Debug,
            "INFO" => LogLevel::Info,
            "WARN" | "WARNING" => LogLevel::Warn,
            "ERROR" => LogLevel::Error,
            "FATAL" | "CRITICAL" => LogLevel::Fatal,
            _ => LogLevel::Other(upper),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Other(label) => label,
        }
    }

    /// Counted as an error by the aggregator
    pub fn is_error(&self) -> bool {
        matches!(self, LogLevel::Error | LogLevel::Fatal)
    }

    /// Counted as a warning by the aggregator
    pub fn is_warning(&self) -> bool {
        matches!(self, LogLevel::Warn)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(LogLevel::from_label(&label))
    }
}

/// One normalized record derived from a single raw log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Parsed timestamp, or the wall clock at parse time when the line's
    /// timestamp could not be read
    pub timestamp: DateTime<Utc>,

    pub level: LogLevel,

    /// Payload with the format's structural fields stripped
    pub message: String,

    /// Which recognized format produced this entry
    pub source: LogFormat,

    /// Client address (web-access entries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Response status (web-access entries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<String>,

    /// Response time in milliseconds, when the message reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<f64>,
}

impl LogEntry {
    /// Create an entry carrying only the always-present fields
    pub fn new(timestamp: DateTime<Utc>, level: LogLevel, message: String, source: LogFormat) -> Self {
        Self {
            timestamp,
            level,
            message,
            source,
            address: None,
            status_code: None,
            user_agent: None,
            hostname: None,
            process: None,
            response_time_ms: None,
        }
    }
}

/// Earliest and latest timestamp observed during one analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Degenerate range used when nothing was observed
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { start: instant, end: instant }
    }
}

/// Summary snapshot produced by one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogStats {
    pub total_entries: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub unique_addresses: usize,
    /// Mean of response-time samples in milliseconds, 0.0 without samples
    pub avg_response_time: f64,
    /// Most frequent error messages, most frequent first
    pub top_errors: Vec<(String, usize)>,
    /// Most frequent client addresses, most frequent first
    pub top_addresses: Vec<(String, usize)>,
    pub time_range: TimeRange,
}

impl LogStats {
    /// Snapshot for a run that saw no entries
    pub fn empty() -> Self {
        Self {
            total_entries: 0,
            error_count: 0,
            warning_count: 0,
            unique_addresses: 0,
            avg_response_time: 0.0,
            top_errors: Vec::new(),
            top_addresses: Vec::new(),
            time_range: TimeRange::at(Utc::now()),
        }
    }
}

impl Default for LogStats {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    impl Arbitrary for LogLevel {
        fn arbitrary(g: &mut Gen) -> Self {
            let levels = [
                LogLevel::Trace,
                LogLevel::Debug,
                LogLevel::Info,
                LogLevel::Warn,
                LogLevel::Error,
                LogLevel::Fatal,
                LogLevel::Other("NOTICE".to_string()),
            ];
            g.choose(&levels).cloned().unwrap_or(LogLevel::Info)
        }
    }

    // Normalizing a level's own label is a fixed point
    #[quickcheck]
    fn prop_level_label_round_trips(level: LogLevel) -> bool {
        LogLevel::from_label(level.as_str()) == level
    }

    #[quickcheck]
    fn prop_error_and_warning_are_disjoint(level: LogLevel) -> bool {
        !(level.is_error() && level.is_warning())
    }

    #[test]
    fn test_level_aliases() {
        assert_eq!(LogLevel::from_label("warning"), LogLevel::Warn);
        assert_eq!(LogLevel::from_label("Critical"), LogLevel::Fatal);
        assert_eq!(LogLevel::from_label("error"), LogLevel::Error);
        assert_eq!(LogLevel::from_label("crit"), LogLevel::Other("CRIT".to_string()));
        assert!(!LogLevel::from_label("crit").is_error());
    }

    #[test]
    fn test_level_serializes_as_label() {
        let json = serde_json::to_string(&LogLevel::Other("NOTICE".to_string())).unwrap();
        assert_eq!(json, "\"NOTICE\"");
        let level: LogLevel = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(level, LogLevel::Warn);
    }

    #[test]
    fn test_entry_optional_fields_start_absent() {
        let entry = LogEntry::new(Utc::now(), LogLevel::Info, "hello".to_string(), LogFormat::Generic);
        assert!(entry.address.is_none());
        assert!(entry.status_code.is_none());
        assert!(entry.response_time_ms.is_none());

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("address").is_none());
        assert_eq!(json["source"], "generic");
        assert_eq!(json["level"], "INFO");
    }

    #[test]
    fn test_empty_stats_has_degenerate_range() {
        let stats = LogStats::empty();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.avg_response_time, 0.0);
        assert_eq!(stats.time_range.start, stats.time_range.end);
    }
}
