//! Worker implementation
//!
//! A worker is the execution unit of the engine: it takes work units, scans
//! their candidate range and reports one [`UnitResult`] per unit. Workers share
//! nothing but a read-only stop flag, and only raise it themselves when the
//! engine runs with first-factor cancellation.
//!
//! # Example
//!
//! ```
//! use primality::config::Cancellation;
//! use primality::search::{CandidateRange, WorkUnit};
//! use primality::worker::Worker;
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//!
//! let stop_flag = Arc::new(AtomicBool::new(false));
//! let worker = Worker::new(0, Cancellation::RunToCompletion, stop_flag);
//!
//! let result = worker.execute(WorkUnit::new(0, CandidateRange::new(3, 47), 91));
//! assert!(result.factor_found());
//! assert_eq!(result.factor(), Some(7));
//! ```

use crate::config::Cancellation;
use crate::search::{scan_range, CandidateRange, WorkUnit};
use crossbeam::channel::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::trace;

/// What happened to a dispatched unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOutcome {
    /// The range was scanned
    Scanned {
        /// First divisor found in the range
        factor: Option<u64>,
        /// Candidates tested before stopping
        candidates_tested: u64,
        /// Scan time
        elapsed: Duration,
    },
    /// Skipped without scanning because a factor was already known
    Cancelled,
}

/// Result reported for exactly one dispatched work unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitResult {
    /// Partition index of the unit
    pub index: u64,
    /// Worker that handled the unit
    pub worker_id: usize,
    /// Range the unit covered
    pub range: CandidateRange,
    pub outcome: UnitOutcome,
}

impl UnitResult {
    /// "Factor found in this range"
    pub fn factor_found(&self) -> bool {
        self.factor().is_some()
    }

    /// Divisor found in the range, if any
    pub fn factor(&self) -> Option<u64> {
        match self.outcome {
            UnitOutcome::Scanned { factor, .. } => factor,
            UnitOutcome::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.outcome, UnitOutcome::Cancelled)
    }
}

/// Scans work units and reports their results
///
/// Workers are cheap to create; the coordinator builds one per pool thread
/// (or one per rayon split) and moves it onto that thread.
#[derive(Debug, Clone)]
pub struct Worker {
    id: usize,
    cancellation: Cancellation,
    stop_flag: Arc<AtomicBool>,
}

impl Worker {
    /// Create a worker
    ///
    /// # Arguments
    ///
    /// * `id` - Worker ID reported with each result
    /// * `cancellation` - Whether finding a factor should stop other work
    /// * `stop_flag` - Flag shared by every worker in one test
    pub fn new(id: usize, cancellation: Cancellation, stop_flag: Arc<AtomicBool>) -> Self {
        Self {
            id,
            cancellation,
            stop_flag,
        }
    }

    /// Whether a factor has already been reported under first-factor cancellation
    pub fn should_stop(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }

    /// Execute one work unit
    ///
    /// Always returns a result; a unit received after the stop flag was
    /// raised reports [`UnitOutcome::Cancelled`].
    pub fn execute(&self, unit: WorkUnit) -> UnitResult {
        if self.should_stop() {
            trace!(worker = self.id, index = unit.index, "unit cancelled");
            return UnitResult {
                index: unit.index,
                worker_id: self.id,
                range: unit.range,
                outcome: UnitOutcome::Cancelled,
            };
        }

        let start = Instant::now();
        let scan = scan_range(unit.range, unit.n);
        let elapsed = start.elapsed();

        if scan.factor_found() && self.cancellation == Cancellation::FirstFactor {
            self.stop_flag.store(true, Ordering::Relaxed);
        }

        trace!(
            worker = self.id,
            index = unit.index,
            range = %unit.range,
            factor = ?scan.factor,
            "unit scanned"
        );

        UnitResult {
            index: unit.index,
            worker_id: self.id,
            range: unit.range,
            outcome: UnitOutcome::Scanned {
                factor: scan.factor,
                candidates_tested: scan.candidates_tested,
                elapsed,
            },
        }
    }

    /// Consume units from `units` until the queue closes, reporting each result
    ///
    /// Returns the number of units handled. Stops early only if the result
    /// channel has been dropped, which means nobody is waiting for a verdict.
    pub fn run(&self, units: Receiver<WorkUnit>, results: Sender<UnitResult>) -> u64 {
        let mut handled = 0;
        for unit in units.iter() {
            let result = self.execute(unit);
            handled += 1;
            if results.send(result).is_err() {
                break;
            }
        }
        trace!(worker = self.id, handled, "worker finished");
        handled
    }
}
