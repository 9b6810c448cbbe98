use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::models::{LogEntry, LogStats};
use crate::parser::LineParser;
use crate::reader::LogReader;
use crate::report;
use crate::statistics::StatsAccumulator;

/// Batch analyzer over one or more log files.
///
/// Files are read one after another. A file that cannot be opened or read
/// is logged and skipped; analysis itself never fails.
#[derive(Debug, Clone, Default)]
pub struct LogAnalyzer {
    config: AnalyzerConfig,
    parser: LineParser,
}

impl LogAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            parser: LineParser::new(),
        }
    }

    /// Replace the line parser, e.g. one with a fixed clock
    pub fn with_parser(mut self, parser: LineParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Lazy entry sequence for a single file, honoring the configured
    /// format and per-file cap
    pub fn read_log_file(&self, path: impl AsRef<Path>) -> Result<LogReader> {
        LogReader::open(path, self.parser, self.config.format, self.config.max_lines_per_file)
    }

    /// Analyze `paths` in order and return a fresh statistics snapshot
    pub fn analyze<P: AsRef<Path>>(&self, paths: &[P]) -> LogStats {
        let mut acc = StatsAccumulator::new();
        self.for_each_entry(paths, |entry| acc.record(&entry));
        acc.finish()
    }

    /// Every entry from `paths`, in file order, for the diagnostic scans
    pub fn collect_entries<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<LogEntry> {
        let mut entries = Vec::new();
        self.for_each_entry(paths, |entry| entries.push(entry));
        entries
    }

    /// Render the report and, when an output path is configured, write it
    pub fn generate_report(&self, stats: &LogStats) -> Result<String> {
        report::write_report(stats, self.config.output.as_deref())
    }

    fn for_each_entry<P: AsRef<Path>>(&self, paths: &[P], mut sink: impl FnMut(LogEntry)) {
        for path in paths {
            let path = path.as_ref();
            info!(path = %path.display(), "analyzing log file");

            let reader = match self.read_log_file(path) {
                Ok(reader) => reader,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping log file");
                    continue;
                }
            };

            let mut produced = 0usize;
            for item in reader {
                match item {
                    Ok(entry) => {
                        produced += 1;
                        sink(entry);
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, entries = produced, "stopped reading log file");
                        break;
                    }
                }
            }
            debug!(path = %path.display(), entries = produced, "finished log file");
        }
    }
}
