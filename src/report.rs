use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{AnalyzerError, Result};
use crate::models::LogStats;

const RULE_WIDTH: usize = 60;
const REPORTED_ERRORS: usize = 5;
const REPORTED_ADDRESSES: usize = 10;
const ERROR_MESSAGE_WIDTH: usize = 80;

/// Render the fixed-layout text report. Lines are joined with `\n` and the
/// text carries no trailing newline.
pub fn render_report(stats: &LogStats) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "LOG ANALYSIS REPORT".to_string(),
        rule.clone(),
        String::new(),
        "BASIC STATISTICS:".to_string(),
        format!("  Total log entries: {}", group_thousands(stats.total_entries)),
        format!("  Error entries: {}", group_thousands(stats.error_count)),
        format!("  Warning entries: {}", group_thousands(stats.warning_count)),
        format!("  Unique IP addresses: {}", group_thousands(stats.unique_addresses)),
        format!("  Average response time: {:.2}ms", stats.avg_response_time),
        format!(
            "  Time range: {} to {}",
            format_instant(&stats.time_range.start),
            format_instant(&stats.time_range.end)
        ),
        String::new(),
    ];

    if !stats.top_errors.is_empty() {
        lines.push("TOP ERROR MESSAGES:".to_string());
        for (i, (message, count)) in stats.top_errors.iter().take(REPORTED_ERRORS).enumerate() {
            lines.push(format!(
                "  {}. {}... ({} times)",
                i + 1,
                truncate_chars(message, ERROR_MESSAGE_WIDTH),
                count
            ));
        }
        lines.push(String::new());
    }

    if !stats.top_addresses.is_empty() {
        lines.push("TOP IP ADDRESSES:".to_string());
        for (i, (address, count)) in stats.top_addresses.iter().take(REPORTED_ADDRESSES).enumerate() {
            lines.push(format!("  {}. {}: {} requests", i + 1, address, count));
        }
        lines.push(String::new());
    }

    lines.push(rule);
    lines.join("\n")
}

/// Render the report and, when `output` is given, also write it there,
/// replacing any existing content
pub fn write_report(stats: &LogStats, output: Option<&Path>) -> Result<String> {
    let text = render_report(stats);
    if let Some(path) = output {
        save_output(&text, path)?;
    }
    Ok(text)
}

/// Write rendered output (text report or JSON) to `path`, overwriting it
pub fn save_output(text: &str, path: &Path) -> Result<()> {
    fs::write(path, text).map_err(|e| AnalyzerError::io(path, e))?;
    info!(path = %path.display(), "report saved");
    Ok(())
}

fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// First `max` characters of `s`
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
