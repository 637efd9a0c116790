//! Search statistics
//!
//! Per-worker counters recorded while scanning work units, plus the
//! aggregator that folds unit results into a verdict.
//!
//! # Example
//!
//! ```
//! use primality::stats::WorkerStats;
//! use std::time::Duration;
//!
//! let mut stats = WorkerStats::new();
//! stats.record_scan(50, false, Duration::from_micros(3));
//! stats.record_scan(2, true, Duration::from_micros(1));
//! stats.record_cancelled();
//!
//! assert_eq!(stats.units_scanned(), 2);
//! assert_eq!(stats.units_cancelled(), 1);
//! assert_eq!(stats.candidates_tested(), 52);
//! assert_eq!(stats.factors_found(), 1);
//! ```

pub mod aggregator;

use crate::util::time::calculate_rate;
use std::time::Duration;

/// Counters for the units handled by one worker
///
/// Each worker owns its statistics outright; they are only combined after the
/// fact by the aggregator, so no atomics are needed here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerStats {
    units_scanned: u64,
    units_cancelled: u64,
    candidates_tested: u64,
    factors_found: u64,
    busy_time: Duration,
}

impl WorkerStats {
    /// Create an empty statistics record
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scanned unit
    ///
    /// # Arguments
    ///
    /// * `candidates` - Candidates tested before the scan stopped
    /// * `factor_found` - Whether the unit found a divisor
    /// * `elapsed` - Time spent scanning
    pub fn record_scan(&mut self, candidates: u64, factor_found: bool, elapsed: Duration) {
        self.units_scanned += 1;
        self.candidates_tested += candidates;
        if factor_found {
            self.factors_found += 1;
        }
        self.busy_time += elapsed;
    }

    /// Record a unit that was skipped because a factor was already known
    pub fn record_cancelled(&mut self) {
        self.units_cancelled += 1;
    }

    pub fn units_scanned(&self) -> u64 {
        self.units_scanned
    }

    pub fn units_cancelled(&self) -> u64 {
        self.units_cancelled
    }

    /// Units reported, scanned or cancelled
    pub fn total_units(&self) -> u64 {
        self.units_scanned + self.units_cancelled
    }

    pub fn candidates_tested(&self) -> u64 {
        self.candidates_tested
    }

    /// Number of units that found a divisor
    pub fn factors_found(&self) -> u64 {
        self.factors_found
    }

    /// Total time spent scanning
    pub fn busy_time(&self) -> Duration {
        self.busy_time
    }

    /// Candidates tested per second of busy time
    pub fn candidates_per_sec(&self) -> f64 {
        calculate_rate(self.candidates_tested, self.busy_time)
    }

    /// Merge statistics from another worker into this one
    pub fn merge(&mut self, other: &WorkerStats) {
        self.units_scanned += other.units_scanned;
        self.units_cancelled += other.units_cancelled;
        self.candidates_tested += other.candidates_tested;
        self.factors_found += other.factors_found;
        self.busy_time += other.busy_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let stats = WorkerStats::new();
        assert_eq!(stats.total_units(), 0);
        assert_eq!(stats.candidates_tested(), 0);
        assert_eq!(stats.busy_time(), Duration::ZERO);
        assert_eq!(stats.candidates_per_sec(), 0.0);
    }

    #[test]
    fn test_record_scan() {
        let mut stats = WorkerStats::new();
        stats.record_scan(50, false, Duration::from_millis(2));
        stats.record_scan(10, true, Duration::from_millis(1));

        assert_eq!(stats.units_scanned(), 2);
        assert_eq!(stats.candidates_tested(), 60);
        assert_eq!(stats.factors_found(), 1);
        assert_eq!(stats.busy_time(), Duration::from_millis(3));
    }

    #[test]
    fn test_merge() {
        let mut a = WorkerStats::new();
        a.record_scan(50, false, Duration::from_millis(1));
        a.record_cancelled();

        let mut b = WorkerStats::new();
        b.record_scan(20, true, Duration::from_millis(4));

        a.merge(&b);
        assert_eq!(a.units_scanned(), 2);
        assert_eq!(a.units_cancelled(), 1);
        assert_eq!(a.total_units(), 3);
        assert_eq!(a.candidates_tested(), 70);
        assert_eq!(a.factors_found(), 1);
        assert_eq!(a.busy_time(), Duration::from_millis(5));
    }

    #[test]
    fn test_candidates_per_sec() {
        let mut stats = WorkerStats::new();
        stats.record_scan(1_000, false, Duration::from_secs(2));
        assert_eq!(stats.candidates_per_sec(), 500.0);
    }
}
