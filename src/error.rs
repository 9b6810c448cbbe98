use std::io;
use std::path::PathBuf;

/// Errors surfaced by the analyzer's fallible edges (file access, config,
/// report persistence). Line parsing itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// Input file does not exist
    #[error("log file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O failure while opening, reading or writing a path
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file could not be decoded
    #[error("invalid configuration in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Format name not in the recognized set
    #[error("unknown log format '{0}', expected one of: auto, apache, application, syslog, docker, nginx, generic")]
    UnknownFormat(String),

    /// Statistics could not be rendered as JSON
    #[error("failed to serialize statistics: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Glob pattern given on the command line is malformed or unreadable
    #[error("bad file pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

impl AnalyzerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            AnalyzerError::NotFound(path)
        } else {
            AnalyzerError::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_split_out_of_io() {
        let err = AnalyzerError::io("missing.log", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, AnalyzerError::NotFound(_)));
        assert_eq!(err.to_string(), "log file not found: missing.log");

        let err = AnalyzerError::io("locked.log", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, AnalyzerError::Io { .. }));
        assert!(err.to_string().starts_with("I/O error on locked.log"));
    }

    #[test]
    fn test_unknown_format_message_lists_choices() {
        let err = AnalyzerError::UnknownFormat("xml".to_string());
        assert!(err.to_string().contains("'xml'"));
        assert!(err.to_string().contains("nginx"));
    }
}
