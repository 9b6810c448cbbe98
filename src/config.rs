use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};
use crate::formats::FormatHint;

/// Settings for one analysis run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Format used for every line, or `auto` to detect per line
    pub format: FormatHint,

    /// Maximum entries read from each file (unbounded when absent or 0)
    pub max_lines_per_file: Option<usize>,

    /// Where the rendered report is written in addition to being returned
    pub output: Option<PathBuf>,
}

impl AnalyzerConfig {
    /// Load settings from a JSON file; absent keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| AnalyzerError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| AnalyzerError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_format(mut self, format: FormatHint) -> Self {
        self.format = format;
        self
    }

    pub fn with_max_lines(mut self, max_lines: Option<usize>) -> Self {
        self.max_lines_per_file = max_lines;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}
