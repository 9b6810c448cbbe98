//! Compiled line-shape patterns and the keyword signal sets used by the
//! diagnostic scans.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::fmt;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in log pattern must compile")
}

fn compile_ci(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("built-in signal pattern must compile")
}

/// `203.0.113.5 - - [10/Oct/2023:13:55:36 +0000] "GET / HTTP/1.1" 200 1024 "-" "curl/7.68.0"`
pub static WEB_ACCESS: Lazy<Regex> = Lazy::new(|| {
    compile(concat!(
        r#"^(?P<address>\d+\.\d+\.\d+\.\d+) - - \[(?P<timestamp>[^\]]+)\] "#,
        r#""(?P<method>\w+) (?P<path>[^\s]*) (?P<protocol>[^"]*)" "#,
        r#"(?P<status>\d+) (?P<size>\d+|-) "#,
        r#""(?P<referer>[^"]*)" "(?P<user_agent>[^"]*)""#,
    ))
});

/// `2023-10-10 13:55:36 [ERROR] Database connection failed`
pub static APPLICATION: Lazy<Regex> = Lazy::new(|| {
    compile(r"^(?P<timestamp>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}[.\d]*) \[(?P<level>\w+)\] (?P<message>.*)")
});

/// `Oct 10 13:55:36 web01 sshd[1234]: Accepted publickey`
pub static SYSLOG: Lazy<Regex> = Lazy::new(|| {
    compile(r"^(?P<timestamp>\w{3} \d{1,2} \d{2}:\d{2}:\d{2}) (?P<hostname>\S+) (?P<process>\S+): (?P<message>.*)")
});

/// `2023-10-10T13:55:36.123456789Z stderr F panic: boom`
pub static CONTAINER: Lazy<Regex> = Lazy::new(|| {
    compile(r"^(?P<timestamp>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d+Z) (?P<stream>stdout|stderr) F (?P<message>.*)")
});

/// `2023/10/10 13:55:36 [error] 1234#0: *5 connect() failed`
pub static PROXY_ERROR: Lazy<Regex> = Lazy::new(|| {
    compile(concat!(
        r"^(?P<timestamp>\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}) \[(?P<level>\w+)\] ",
        r"(?P<pid>\d+)#(?P<tid>\d+): \*(?P<connection>\d+) (?P<message>.*)",
    ))
});

/// Leading ISO-ish timestamp the generic fallback strips off
pub static LEADING_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| compile(r"^(\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2})"));

/// Trailing `+0000` style offset, removed for a second timestamp attempt
pub static TRAILING_OFFSET: Lazy<Regex> = Lazy::new(|| compile(r"\s*[+-]\d{4}$"));

/// Response-time measurement inside a message, e.g. `response time: 250ms`.
/// The first `<n>ms` after the phrase wins; other digits in between are skipped.
pub static RESPONSE_TIME: Lazy<Regex> =
    Lazy::new(|| compile_ci(r"response[\s_]+time.*?(?P<ms>\d+(?:\.\d+)?)\s*ms\b"));

/// Keyword classes hinting that a message describes a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSignal {
    Error,
    Exception,
    Failed,
    Timeout,
    Critical,
    Fatal,
}

impl ErrorSignal {
    pub const ALL: [ErrorSignal; 6] = [
        ErrorSignal::Error,
        ErrorSignal::Exception,
        ErrorSignal::Failed,
        ErrorSignal::Timeout,
        ErrorSignal::Critical,
        ErrorSignal::Fatal,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ErrorSignal::Error => "error",
            ErrorSignal::Exception => "exception",
            ErrorSignal::Failed => "failed",
            ErrorSignal::Timeout => "timeout",
            ErrorSignal::Critical => "critical",
            ErrorSignal::Fatal => "fatal",
        }
    }

    pub fn pattern(self) -> &'static Regex {
        &ERROR_SIGNALS[self as usize]
    }
}

impl fmt::Display for ErrorSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// Indexed by `ErrorSignal as usize`
static ERROR_SIGNALS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ErrorSignal::ALL
        .iter()
        .map(|signal| compile_ci(&regex::escape(signal.keyword())))
        .collect()
});

/// Keyword classes hinting at a performance problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceSignal {
    SlowQuery,
    HighMemory,
    CpuUsage,
    ResponseTime,
}

impl PerformanceSignal {
    pub const ALL: [PerformanceSignal; 4] = [
        PerformanceSignal::SlowQuery,
        PerformanceSignal::HighMemory,
        PerformanceSignal::CpuUsage,
        PerformanceSignal::ResponseTime,
    ];

    pub fn pattern(self) -> &'static Regex {
        match self {
            PerformanceSignal::SlowQuery => &*SLOW_QUERY,
            PerformanceSignal::HighMemory => &*HIGH_MEMORY,
            PerformanceSignal::CpuUsage => &*CPU_USAGE,
            PerformanceSignal::ResponseTime => &*RESPONSE_TIME,
        }
    }
}

impl fmt::Display for PerformanceSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PerformanceSignal::SlowQuery => "slow query",
            PerformanceSignal::HighMemory => "high memory",
            PerformanceSignal::CpuUsage => "cpu usage",
            PerformanceSignal::ResponseTime => "response time",
        };
        f.write_str(name)
    }
}

static SLOW_QUERY: Lazy<Regex> = Lazy::new(|| compile_ci(r"slow\s+query"));
static HIGH_MEMORY: Lazy<Regex> = Lazy::new(|| compile_ci(r"high\s+memory"));
static CPU_USAGE: Lazy<Regex> = Lazy::new(|| compile_ci(r"cpu\s+usage"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_access_captures() {
        let line = r#"203.0.113.5 - - [10/Oct/2023:13:55:36 +0000] "GET /index.html HTTP/1.1" 200 1024 "-" "curl/7.68.0""#;
        let caps = WEB_ACCESS.captures(line).unwrap();
        assert_eq!(&caps["address"], "203.0.113.5");
        assert_eq!(&caps["timestamp"], "10/Oct/2023:13:55:36 +0000");
        assert_eq!(&caps["status"], "200");
        assert_eq!(&caps["user_agent"], "curl/7.68.0");
    }

    #[test]
    fn test_patterns_are_anchored_at_line_start() {
        assert!(!APPLICATION.is_match("prefix 2023-10-10 13:55:36 [ERROR] boom"));
        assert!(!SYSLOG.is_match(" Oct 10 13:55:36 host proc: msg"));
        assert!(CONTAINER.is_match("2023-10-10T13:55:36.1Z stdout F hi"));
        assert!(PROXY_ERROR.is_match("2023/10/10 13:55:36 [error] 1#0: *5 upstream timed out"));
    }

    #[test]
    fn test_error_signals_are_case_insensitive() {
        assert!(ErrorSignal::Exception.pattern().is_match("NullPointerEXCEPTION thrown"));
        assert!(ErrorSignal::Timeout.pattern().is_match("request TimeOut"));
        assert!(!ErrorSignal::Fatal.pattern().is_match("all good"));
        assert_eq!(ErrorSignal::Failed.to_string(), "failed");
    }

    #[test]
    fn test_performance_signals() {
        assert!(PerformanceSignal::SlowQuery.pattern().is_match("SLOW  QUERY on users"));
        assert!(PerformanceSignal::HighMemory.pattern().is_match("High memory usage detected"));
        assert!(PerformanceSignal::CpuUsage.pattern().is_match("cpu usage at 97%"));
        assert!(PerformanceSignal::ResponseTime.pattern().is_match("Response time was 1250ms"));
        assert!(!PerformanceSignal::ResponseTime.pattern().is_match("response time unknown"));
    }

    #[test]
    fn test_response_time_captures_whole_number() {
        let caps = RESPONSE_TIME.captures("response time for /api: 1250.5 ms").unwrap();
        assert_eq!(&caps["ms"], "1250.5");
    }
}
