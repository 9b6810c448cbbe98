use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::{LogEntry, LogStats, TimeRange};

/// Number of entries kept in each ranked list of a snapshot
pub const TOP_N: usize = 10;

/// Occurrence counter that ranks by count, breaking ties by first-seen order
#[derive(Debug, Clone, Default)]
pub struct FrequencyCounter {
    // value -> (count, first-seen sequence number)
    counts: HashMap<String, (usize, usize)>,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: &str) {
        let next_seq = self.counts.len();
        match self.counts.get_mut(value) {
            Some((count, _)) => *count += 1,
            None => {
                self.counts.insert(value.to_string(), (1, next_seq));
            }
        }
    }

    pub fn get(&self, value: &str) -> usize {
        self.counts.get(value).map_or(0, |(count, _)| *count)
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Up to `n` values, most frequent first
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(&String, &(usize, usize))> = self.counts.iter().collect();
        ranked.sort_by(|(_, (count_a, seq_a)), (_, (count_b, seq_b))| {
            count_b.cmp(count_a).then(seq_a.cmp(seq_b))
        });
        ranked
            .into_iter()
            .take(n)
            .map(|(value, (count, _))| (value.clone(), *count))
            .collect()
    }
}

/// Running totals for one analysis call.
///
/// Built fresh for every call and consumed by `finish`, so nothing carries
/// over between runs.
#[derive(Debug, Clone, Default)]
pub struct StatsAccumulator {
    total_entries: usize,
    error_count: usize,
    warning_count: usize,
    error_messages: FrequencyCounter,
    addresses: FrequencyCounter,
    response_time_sum: f64,
    response_time_samples: usize,
    earliest: Option<DateTime<Utc>>,
    latest: Option<DateTime<Utc>>,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one entry into the totals
    pub fn record(&mut self, entry: &LogEntry) {
        self.total_entries += 1;

        if entry.level.is_error() {
            self.error_count += 1;
            self.error_messages.add(&entry.message);
        } else if entry.level.is_warning() {
            self.warning_count += 1;
        }

        if let Some(address) = &entry.address {
            self.addresses.add(address);
        }

        if let Some(ms) = entry.response_time_ms {
            self.response_time_sum += ms;
            self.response_time_samples += 1;
        }

        self.earliest = Some(self.earliest.map_or(entry.timestamp, |t| t.min(entry.timestamp)));
        self.latest = Some(self.latest.map_or(entry.timestamp, |t| t.max(entry.timestamp)));
    }

    pub fn total_entries(&self) -> usize {
        self.total_entries
    }

    /// Produce the snapshot; an empty run gets a degenerate "now" range
    pub fn finish(self) -> LogStats {
        let avg_response_time = if self.response_time_samples == 0 {
            0.0
        } else {
            self.response_time_sum / self.response_time_samples as f64
        };

        let time_range = match (self.earliest, self.latest) {
            (Some(start), Some(end)) => TimeRange { start, end },
            _ => TimeRange::at(Utc::now()),
        };

        LogStats {
            total_entries: self.total_entries,
            error_count: self.error_count,
            warning_count: self.warning_count,
            unique_addresses: self.addresses.len(),
            avg_response_time,
            top_errors: self.error_messages.most_common(TOP_N),
            top_addresses: self.addresses.most_common(TOP_N),
            time_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::LogFormat;
    use crate::models::LogLevel;
    use chrono::TimeZone;
    use quickcheck_macros::quickcheck;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 12, 1, 12, minute, 0).unwrap()
    }

    fn entry(minute: u32, level: LogLevel, message: &str) -> LogEntry {
        LogEntry::new(at(minute), level, message.to_string(), LogFormat::Application)
    }

    fn request(minute: u32, address: &str) -> LogEntry {
        let mut e = LogEntry::new(at(minute), LogLevel::Info, "GET / HTTP/1.1".to_string(), LogFormat::Apache);
        e.address = Some(address.to_string());
        e.status_code = Some(200);
        e
    }

    #[test]
    fn test_most_common_breaks_ties_by_first_seen() {
        let mut counter = FrequencyCounter::new();
        for value in ["b", "a", "c", "a", "c", "d"] {
            counter.add(value);
        }
        assert_eq!(
            counter.most_common(10),
            vec![
                ("a".to_string(), 2),
                ("c".to_string(), 2),
                ("b".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
        assert_eq!(counter.most_common(1), vec![("a".to_string(), 2)]);
        assert_eq!(counter.get("zzz"), 0);
    }

    #[quickcheck]
    fn prop_most_common_is_sorted_and_capped(values: Vec<u8>, n: usize) -> bool {
        let n = n % 20;
        let mut counter = FrequencyCounter::new();
        for v in &values {
            counter.add(&v.to_string());
        }
        let top = counter.most_common(n);
        top.len() == n.min(counter.len())
            && top.windows(2).all(|w| w[0].1 >= w[1].1)
            && top.iter().all(|(value, count)| counter.get(value) == *count)
    }

    #[test]
    fn test_level_classification() {
        let mut acc = StatsAccumulator::new();
        acc.record(&entry(0, LogLevel::Info, "started"));
        acc.record(&entry(1, LogLevel::Error, "db failed"));
        acc.record(&entry(2, LogLevel::Warn, "memory high"));
        acc.record(&entry(3, LogLevel::Fatal, "out of memory"));
        acc.record(&entry(4, LogLevel::Error, "db failed"));
        acc.record(&entry(5, LogLevel::Other("NOTICE".to_string()), "fyi"));

        let stats = acc.finish();
        assert_eq!(stats.total_entries, 6);
        assert_eq!(stats.error_count, 3);
        assert_eq!(stats.warning_count, 1);
        assert_eq!(
            stats.top_errors,
            vec![("db failed".to_string(), 2), ("out of memory".to_string(), 1)]
        );
        assert_eq!(stats.time_range, TimeRange { start: at(0), end: at(5) });
    }

    #[test]
    fn test_addresses_and_response_times() {
        let mut acc = StatsAccumulator::new();
        acc.record(&request(3, "192.168.1.1"));
        acc.record(&request(1, "192.168.1.2"));
        acc.record(&request(2, "192.168.1.1"));

        let mut timed = entry(0, LogLevel::Info, "response time 10ms");
        timed.response_time_ms = Some(10.0);
        acc.record(&timed);
        timed.response_time_ms = Some(21.0);
        acc.record(&timed);

        let stats = acc.finish();
        assert_eq!(stats.unique_addresses, 2);
        assert_eq!(stats.top_addresses[0], ("192.168.1.1".to_string(), 2));
        assert_eq!(stats.avg_response_time, 15.5);
        assert_eq!(stats.time_range.start, at(0));
        assert_eq!(stats.time_range.end, at(3));
    }

    #[test]
    fn test_average_counts_only_timed_entries() {
        let mut acc = StatsAccumulator::new();
        assert_eq!(acc.clone().finish().avg_response_time, 0.0);

        for minute in 0..1000u32 {
            let mut e = entry(minute % 60, LogLevel::Info, "tick");
            if minute % 250 == 0 {
                e.response_time_ms = Some(f64::from(minute));
            }
            acc.record(&e);
        }
        let stats = acc.finish();
        assert_eq!(stats.total_entries, 1000);
        // samples at 0, 250, 500 and 750
        assert_eq!(stats.avg_response_time, 375.0);
    }

    #[test]
    fn test_top_lists_are_capped() {
        let mut acc = StatsAccumulator::new();
        for i in 0..15u32 {
            acc.record(&request(i, &format!("10.0.0.{}", i)));
        }
        let stats = acc.finish();
        assert_eq!(stats.unique_addresses, 15);
        assert_eq!(stats.top_addresses.len(), TOP_N);
        assert_eq!(stats.top_addresses[0].0, "10.0.0.0");
    }

    #[test]
    fn test_empty_accumulator() {
        let stats = StatsAccumulator::new().finish();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.avg_response_time, 0.0);
        assert!(stats.top_errors.is_empty());
        assert_eq!(stats.time_range.start, stats.time_range.end);
    }
}
