use colored::*;
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::error::{AnalyzerError, Result};
use crate::models::{LogEntry, LogStats};
use crate::patterns::{ErrorSignal, PerformanceSignal};

/// Pretty JSON rendering of a statistics snapshot
pub fn stats_to_json(stats: &LogStats) -> Result<String> {
    serde_json::to_string_pretty(stats).map_err(AnalyzerError::Serialize)
}

pub fn print_notice(message: &str) {
    eprintln!("{} {}", "note:".yellow().bold(), message);
}

/// Per-signal summary of a diagnostic scan
pub fn write_scan_summary(
    writer: &mut impl Write,
    scanned: usize,
    error_matches: &BTreeMap<ErrorSignal, Vec<&LogEntry>>,
    performance_counts: &BTreeMap<PerformanceSignal, usize>,
    performance_issues: &[&LogEntry],
    show_matches: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", "═".repeat(50).cyan())?;
    writeln!(writer, "{}", "SIGNAL SCAN".cyan().bold())?;
    writeln!(writer, "{}", "═".repeat(50).cyan())?;
    writeln!(writer, "Entries scanned:  {}", scanned.to_string().white().bold())?;

    if error_matches.is_empty() {
        writeln!(writer, "\n{}", "No error signals found".green())?;
    } else {
        writeln!(writer, "\n{}:", "Error signals".red().bold())?;
        for (signal, entries) in error_matches {
            writeln!(writer, "  {:12} {:>6} matches", signal.to_string(), entries.len())?;
            if show_matches {
                for entry in entries {
                    writeln!(writer, "      {} {}", format_entry_prefix(entry).dimmed(), entry.message)?;
                }
            }
        }
    }

    if performance_issues.is_empty() {
        writeln!(writer, "\n{}", "No performance issues found".green())?;
    } else {
        writeln!(
            writer,
            "\n{}: {} entries",
            "Performance issues".yellow().bold(),
            performance_issues.len()
        )?;
        for (signal, count) in performance_counts {
            writeln!(writer, "  {:14} {:>6}", signal.to_string(), count)?;
        }
        if show_matches {
            for entry in performance_issues {
                writeln!(writer, "      {} {}", format_entry_prefix(entry).dimmed(), entry.message)?;
            }
        }
    }

    Ok(())
}

fn format_entry_prefix(entry: &LogEntry) -> String {
    format!(
        "{} [{}] {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.level,
        entry.source
    )
}
