use std::io::{stdout, Write};

use crate::analyzer::LogAnalyzer;
use crate::cli::ScanArgs;
use crate::commands::expand_globs;
use crate::commands::output::{print_notice, write_scan_summary};
use crate::config::AnalyzerConfig;
use crate::diagnostics::{count_performance_signals, find_error_patterns, find_performance_issues};
use crate::error::{AnalyzerError, Result};
use crate::formats::FormatHint;

pub fn run_scan(args: ScanArgs) -> Result<()> {
    let config = AnalyzerConfig::default()
        .with_format(args.format.map(FormatHint::from).unwrap_or_default())
        .with_max_lines(args.max_lines);

    let files = expand_globs(&args.files)?;
    if files.is_empty() {
        print_notice("no files matched the given patterns");
        return Ok(());
    }

    let entries = LogAnalyzer::new(config).collect_entries(&files);
    let error_matches = find_error_patterns(&entries);
    let performance_issues = find_performance_issues(&entries);
    let performance_counts = count_performance_signals(&entries);

    let mut out = stdout().lock();
    write_scan_summary(
        &mut out,
        entries.len(),
        &error_matches,
        &performance_counts,
        &performance_issues,
        args.show_matches,
    )
    .and_then(|_| out.flush())
    .map_err(|e| AnalyzerError::io("<stdout>", e))
}
