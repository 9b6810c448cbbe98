use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalyzerError;
use crate::patterns;

/// Recognized log line shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Web-server combined access log
    Apache,
    /// `timestamp [LEVEL] message`
    Application,
    /// BSD syslog without a year
    Syslog,
    /// Container runtime stream log (CRI format)
    Docker,
    /// Reverse-proxy error log
    #[serde(alias = "nginx_error")]
    Nginx,
    /// Catch-all for anything else
    Generic,
}

/// Detection precedence: the first pattern matching the line start wins.
/// `Generic` is implied after the list is exhausted.
pub const DETECTION_ORDER: [LogFormat; 5] = [
    LogFormat::Apache,
    LogFormat::Application,
    LogFormat::Syslog,
    LogFormat::Docker,
    LogFormat::Nginx,
];

impl LogFormat {
    /// Tag recorded on entries of this format
    pub fn tag(self) -> &'static str {
        match self {
            LogFormat::Apache => "apache",
            LogFormat::Application => "application",
            LogFormat::Syslog => "syslog",
            LogFormat::Docker => "docker",
            LogFormat::Nginx => "nginx",
            LogFormat::Generic => "generic",
        }
    }

    /// The line-shape pattern owned by this format; `Generic` has none
    pub fn pattern(self) -> Option<&'static Regex> {
        match self {
            LogFormat::Apache => Some(&*patterns::WEB_ACCESS),
            LogFormat::Application => Some(&*patterns::APPLICATION),
            LogFormat::Syslog => Some(&*patterns::SYSLOG),
            LogFormat::Docker => Some(&*patterns::CONTAINER),
            LogFormat::Nginx => Some(&*patterns::PROXY_ERROR),
            LogFormat::Generic => None,
        }
    }

    /// Whether this format's pattern matches at the start of `line`
    pub fn matches(self, line: &str) -> bool {
        self.pattern().map_or(true, |pattern| pattern.is_match(line))
    }

    /// Detect the format of an already-trimmed line
    pub fn detect(line: &str) -> LogFormat {
        DETECTION_ORDER
            .iter()
            .copied()
            .find(|format| format.matches(line))
            .unwrap_or(LogFormat::Generic)
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LogFormat {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apache" => Ok(LogFormat::Apache),
            "application" => Ok(LogFormat::Application),
            "syslog" => Ok(LogFormat::Syslog),
            "docker" => Ok(LogFormat::Docker),
            "nginx" | "nginx_error" => Ok(LogFormat::Nginx),
            "generic" => Ok(LogFormat::Generic),
            _ => Err(AnalyzerError::UnknownFormat(s.to_string())),
        }
    }
}

/// How the parser chooses a format for each line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatHint {
    /// Detect per line using `DETECTION_ORDER`
    #[default]
    Auto,
    /// Use exactly this format; lines that do not match are dropped
    Only(LogFormat),
}

impl fmt::Display for FormatHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatHint::Auto => f.write_str("auto"),
            FormatHint::Only(format) => format.fmt(f),
        }
    }
}

impl FromStr for FormatHint {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(FormatHint::Auto)
        } else {
            s.parse().map(FormatHint::Only)
        }
    }
}

impl Serialize for FormatHint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FormatHint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
