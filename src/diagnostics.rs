use std::collections::BTreeMap;

use crate::models::LogEntry;
use crate::patterns::{ErrorSignal, PerformanceSignal, RESPONSE_TIME};

/// Numeric value of a `response time ... <n>ms` measurement in a message
pub fn extract_response_time(message: &str) -> Option<f64> {
    RESPONSE_TIME
        .captures(message)
        .and_then(|caps| caps["ms"].parse().ok())
}

/// Group entries by every error signal their message matches.
///
/// An entry lands under each matching signal, so a message like
/// "request failed: timeout" is listed under both `failed` and `timeout`.
pub fn find_error_patterns(entries: &[LogEntry]) -> BTreeMap<ErrorSignal, Vec<&LogEntry>> {
    let mut matches: BTreeMap<ErrorSignal, Vec<&LogEntry>> = BTreeMap::new();

    for entry in entries {
        for signal in ErrorSignal::ALL {
            if signal.pattern().is_match(&entry.message) {
                matches.entry(signal).or_default().push(entry);
            }
        }
    }

    matches
}

/// Entries whose message matches at least one performance signal
pub fn find_performance_issues(entries: &[LogEntry]) -> Vec<&LogEntry> {
    entries
        .iter()
        .filter(|entry| {
            PerformanceSignal::ALL
                .iter()
                .any(|signal| signal.pattern().is_match(&entry.message))
        })
        .collect()
}

/// Per-signal counts over a set of entries, for reporting
pub fn count_performance_signals(entries: &[LogEntry]) -> BTreeMap<PerformanceSignal, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        for signal in PerformanceSignal::ALL {
            if signal.pattern().is_match(&entry.message) {
                *counts.entry(signal).or_insert(0) += 1;
            }
        }
    }
    counts
}
