use chrono::{DateTime, Utc};
use regex::Captures;

use crate::diagnostics::extract_response_time;
use crate::formats::{FormatHint, LogFormat};
use crate::models::{LogEntry, LogLevel};
use crate::patterns::LEADING_TIMESTAMP;
use crate::timestamp::{
    parse_syslog_timestamp, parse_timestamp, CONTAINER_FORMATS, DEFAULT_FORMATS, PROXY_ERROR_FORMATS,
    WEB_ACCESS_FORMATS,
};

/// Keywords the generic fallback looks for, in priority order
const GENERIC_LEVEL_KEYWORDS: [&str; 5] = ["ERROR", "WARN", "DEBUG", "FATAL", "TRACE"];

/// Turns raw lines into `LogEntry` values.
///
/// Parsing is pure except for reading the clock, which only supplies the
/// timestamp of lines whose own timestamp cannot be read.
#[derive(Debug, Clone, Copy)]
pub struct LineParser {
    clock: fn() -> DateTime<Utc>,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    pub fn new() -> Self {
        Self { clock: Utc::now }
    }

    /// Use a fixed clock for timestamp fallbacks
    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self { clock }
    }

    /// Parse one raw line.
    ///
    /// Blank lines yield `None`. With `FormatHint::Auto` every other line
    /// yields an entry (the generic rule catches whatever the recognized
    /// formats do not); with `FormatHint::Only` a line that does not fit the
    /// named format yields `None`.
    pub fn parse(&self, line: &str, hint: FormatHint) -> Option<LogEntry> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let format = match hint {
            FormatHint::Auto => LogFormat::detect(line),
            FormatHint::Only(format) => format,
        };

        let mut entry = self.extract(format, line)?;
        if entry.response_time_ms.is_none() {
            entry.response_time_ms = extract_response_time(&entry.message);
        }
        Some(entry)
    }

    /// Apply `format`'s extraction rule to a trimmed, non-blank line
    fn extract(&self, format: LogFormat, line: &str) -> Option<LogEntry> {
        let captures = || format.pattern().and_then(|pattern| pattern.captures(line));

        match format {
            LogFormat::Apache => captures().map(|caps| self.from_web_access(&caps)),
            LogFormat::Application => {
                captures().map(|caps| self.from_leveled(LogFormat::Application, &caps, DEFAULT_FORMATS))
            }
            LogFormat::Syslog => captures().map(|caps| self.from_syslog(&caps)),
            LogFormat::Docker => captures().map(|caps| self.from_container(&caps)),
            LogFormat::Nginx => captures().map(|caps| self.from_leveled(LogFormat::Nginx, &caps, PROXY_ERROR_FORMATS)),
            LogFormat::Generic => Some(self.parse_generic(line)),
        }
    }

    fn timestamp_or_now(&self, parsed: Option<DateTime<Utc>>) -> DateTime<Utc> {
        parsed.unwrap_or_else(self.clock)
    }

    fn from_web_access(&self, caps: &Captures) -> LogEntry {
        let timestamp = self.timestamp_or_now(parse_timestamp(&caps["timestamp"], WEB_ACCESS_FORMATS));
        let message = format!("{} {} {}", &caps["method"], &caps["path"], &caps["protocol"]);

        let mut entry = LogEntry::new(timestamp, LogLevel::Info, message, LogFormat::Apache);
        entry.address = Some(caps["address"].to_string());
        // Out-of-range codes (more digits than u16 holds) are left absent
        entry.status_code = caps["status"].parse().ok();
        entry.user_agent = Some(caps["user_agent"].to_string());
        entry
    }

    /// Formats carrying an explicit `[LEVEL]` token
    fn from_leveled(&self, source: LogFormat, caps: &Captures, formats: &[&str]) -> LogEntry {
        let timestamp = self.timestamp_or_now(parse_timestamp(&caps["timestamp"], formats));
        let level = LogLevel::from_label(&caps["level"]);
        LogEntry::new(timestamp, level, caps["message"].to_string(), source)
    }

    fn from_syslog(&self, caps: &Captures) -> LogEntry {
        let timestamp = self.timestamp_or_now(parse_syslog_timestamp(&caps["timestamp"]));

        let mut entry = LogEntry::new(timestamp, LogLevel::Info, caps["message"].to_string(), LogFormat::Syslog);
        entry.hostname = Some(caps["hostname"].to_string());
        entry.process = Some(caps["process"].to_string());
        entry
    }

    fn from_container(&self, caps: &Captures) -> LogEntry {
        let timestamp = self.timestamp_or_now(parse_timestamp(&caps["timestamp"], CONTAINER_FORMATS));
        let level = if &caps["stream"] == "stderr" {
            LogLevel::Error
        } else {
            LogLevel::Info
        };
        LogEntry::new(timestamp, level, caps["message"].to_string(), LogFormat::Docker)
    }

    /// Fallback for lines no recognized format claims; never fails
    fn parse_generic(&self, line: &str) -> LogEntry {
        let (timestamp, message) = match LEADING_TIMESTAMP.find(line) {
            Some(found) => (
                self.timestamp_or_now(parse_timestamp(found.as_str(), DEFAULT_FORMATS)),
                line[found.end()..].trim(),
            ),
            None => ((self.clock)(), line),
        };

        let upper = message.to_uppercase();
        let level = GENERIC_LEVEL_KEYWORDS
            .iter()
            .find(|keyword| upper.contains(*keyword))
            .map_or(LogLevel::Info, |keyword| LogLevel::from_label(keyword));

        LogEntry::new(timestamp, level, message.to_string(), LogFormat::Generic)
    }
}
