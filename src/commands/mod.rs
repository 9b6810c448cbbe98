pub mod analyze;
pub mod demo;
pub mod output;
pub mod scan;

pub use analyze::run_analyze;
pub use demo::run_demo;
pub use scan::run_scan;

use glob::glob;
use std::path::PathBuf;

use crate::error::{AnalyzerError, Result};

/// Expand shell-style patterns; plain paths pass through untouched so a
/// missing file is reported by the analyzer rather than silently dropped
pub fn expand_globs(patterns: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let pattern_str = pattern.to_string_lossy();
        if pattern_str.contains('*') || pattern_str.contains('?') || pattern_str.contains('[') {
            let paths = glob(&pattern_str).map_err(|e| AnalyzerError::Pattern {
                pattern: pattern_str.to_string(),
                message: e.to_string(),
            })?;
            for entry in paths {
                files.push(entry.map_err(|e| AnalyzerError::Pattern {
                    pattern: pattern_str.to_string(),
                    message: e.to_string(),
                })?);
            }
        } else {
            files.push(pattern.clone());
        }
    }
    Ok(files)
}
