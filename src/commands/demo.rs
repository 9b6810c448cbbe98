use colored::*;
use std::io::{stdout, Write};

use crate::analyzer::LogAnalyzer;
use crate::cli::DemoArgs;
use crate::commands::output::write_scan_summary;
use crate::config::AnalyzerConfig;
use crate::demo::write_sample_logs;
use crate::diagnostics::{count_performance_signals, find_error_patterns, find_performance_issues};
use crate::error::{AnalyzerError, Result};

pub fn run_demo(args: DemoArgs) -> Result<()> {
    println!("{}\n", "=== Log Analyzer Demo ===".cyan().bold());

    let files = write_sample_logs(&args.dir)?;
    println!("Sample logs created in {}", args.dir.display());

    let analyzer = LogAnalyzer::new(AnalyzerConfig::default().with_output(Some(args.output.clone())));
    let stats = analyzer.analyze(&files);
    let report = analyzer.generate_report(&stats)?;
    println!("{}", report);
    println!("Report saved to {}", args.output.display());

    println!("\n{}", "=== Pattern Analysis ===".cyan().bold());
    let entries = analyzer.collect_entries(&files);
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
        false,
    )
    .and_then(|_| out.flush())
    .map_err(|e| AnalyzerError::io("<stdout>", e))
}
