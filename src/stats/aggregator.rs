//! Result aggregation
//!
//! Folds per-unit results into a single verdict. The combination is a plain
//! OR over "factor found in this range", so results may arrive in any order
//! and partial aggregators can be merged in any grouping.
//!
//! The aggregator also keeps per-worker statistics for reporting.
//!
//! # Example
//!
//! ```
//! use primality::config::Cancellation;
//! use primality::engine::Verdict;
//! use primality::search::partition::Partitioner;
//! use primality::stats::aggregator::ResultAggregator;
//! use primality::worker::Worker;
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//!
//! let worker = Worker::new(0, Cancellation::RunToCompletion, Arc::new(AtomicBool::new(false)));
//! let mut aggregator = ResultAggregator::new();
//! for unit in Partitioner::new(97, 10).into_units() {
//!     aggregator.record(worker.execute(unit));
//! }
//!
//! assert_eq!(aggregator.units_reported(), 3);
//! assert!(!aggregator.factor_found());
//! assert_eq!(aggregator.verdict(), Verdict::Prime);
//! ```

use crate::engine::Verdict;
use crate::stats::WorkerStats;
use crate::worker::{UnitOutcome, UnitResult};
use std::collections::HashMap;

/// Combines unit results into a verdict
#[derive(Debug, Clone, Default)]
pub struct ResultAggregator {
    /// OR over every recorded result
    factor_found: bool,

    /// Smallest divisor seen across all results
    smallest_factor: Option<u64>,

    units_reported: u64,

    /// Per-worker statistics (worker_id → stats)
    workers: HashMap<usize, WorkerStats>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of one work unit
    pub fn record(&mut self, result: UnitResult) {
        self.units_reported += 1;

        let stats = self.workers.entry(result.worker_id).or_default();
        match result.outcome {
            UnitOutcome::Scanned {
                factor,
                candidates_tested,
                elapsed,
            } => {
                stats.record_scan(candidates_tested, factor.is_some(), elapsed);
                if let Some(divisor) = factor {
                    self.factor_found = true;
                    self.smallest_factor = Some(
                        self.smallest_factor
                            .map_or(divisor, |current| current.min(divisor)),
                    );
                }
            }
            UnitOutcome::Cancelled => stats.record_cancelled(),
        }
    }

    /// Merge another aggregator into this one
    ///
    /// Equivalent to recording every result of `other` here.
    pub fn merge(mut self, other: ResultAggregator) -> Self {
        self.factor_found |= other.factor_found;
        self.smallest_factor = match (self.smallest_factor, other.smallest_factor) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.units_reported += other.units_reported;

        for (worker_id, stats) in other.workers {
            self.workers.entry(worker_id).or_default().merge(&stats);
        }

        self
    }

    /// Whether any recorded unit found a divisor
    pub fn factor_found(&self) -> bool {
        self.factor_found
    }

    /// Smallest divisor reported by any unit
    ///
    /// This is the smallest divisor of `n` overall when every unit was
    /// scanned. Under first-factor cancellation it is only a witness.
    pub fn smallest_factor(&self) -> Option<u64> {
        self.smallest_factor
    }

    /// Primality verdict: prime iff no unit found a divisor
    pub fn verdict(&self) -> Verdict {
        if self.factor_found {
            Verdict::NotPrime
        } else {
            Verdict::Prime
        }
    }

    /// Number of results recorded so far
    pub fn units_reported(&self) -> u64 {
        self.units_reported
    }

    /// Statistics for a specific worker
    pub fn worker_stats(&self, worker_id: usize) -> Option<&WorkerStats> {
        self.workers.get(&worker_id)
    }

    /// Map of worker_id → WorkerStats
    pub fn per_worker(&self) -> &HashMap<usize, WorkerStats> {
        &self.workers
    }

    /// Worker IDs in ascending order
    pub fn worker_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.workers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Statistics summed over all workers
    pub fn totals(&self) -> WorkerStats {
        let mut totals = WorkerStats::new();
        for stats in self.workers.values() {
            totals.merge(stats);
        }
        totals
    }
}
