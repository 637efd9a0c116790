//! Coordinator module
//!
//! Orchestrates workers and aggregates results.
//!
//! The coordinator takes the lazy partition of one test, dispatches its work
//! units onto a fixed number of threads and blocks until every dispatched
//! unit has reported. Two schedulers are available:
//!
//! - **Pool**: up to `threads` scoped worker threads (never more than there
//!   are units) pulling from a bounded crossbeam channel. The coordinator
//!   thread feeds the queue and drains the result channel between sends, so
//!   neither queue grows with `n`. Units left unreported by workers that
//!   exited early are scanned inline afterwards.
//! - **Rayon**: a dedicated rayon pool bridging the partition iterator, with
//!   per-split aggregators merged at the end.
//!
//! If threads cannot be created the search runs inline on the calling thread.
//! The verdict is the same on every path.

use crate::config::{EngineConfig, SchedulerKind};
use crate::search::partition::Partitioner;
use crate::search::WorkUnit;
use crate::stats::aggregator::ResultAggregator;
use crate::worker::{UnitResult, Worker};
use crossbeam::channel;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// How a search was actually executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// Crossbeam worker pool with this many threads
    Pool { workers: usize },
    /// Rayon pool with this many threads
    Rayon { threads: usize },
    /// Calling thread only
    Inline,
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Execution::Pool { workers } => write!(f, "pool ({} workers)", workers),
            Execution::Rayon { threads } => write!(f, "rayon ({} threads)", threads),
            Execution::Inline => write!(f, "inline"),
        }
    }
}

/// Result of one concurrent search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Every result reported for this search
    pub aggregator: ResultAggregator,
    /// Units handed to workers; equals `aggregator.units_reported()`
    pub units_dispatched: u64,
    pub execution: Execution,
}

/// Dispatches work units and waits for their results
#[derive(Debug, Clone)]
pub struct Coordinator {
    config: EngineConfig,
}

impl Coordinator {
    /// Create a coordinator
    ///
    /// The configuration is expected to be validated already; see
    /// [`crate::config::validator::validate_engine`].
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scan every range of `partitioner` and aggregate the results
    pub fn search(&self, partitioner: Partitioner) -> SearchOutcome {
        let stop_flag = Arc::new(AtomicBool::new(false));

        debug!(
            n = partitioner.n(),
            units = partitioner.unit_count(),
            chunk_size = partitioner.chunk_size(),
            scheduler = %self.config.scheduler,
            threads = self.config.threads,
            "dispatching search"
        );

        let outcome = match self.config.scheduler {
            SchedulerKind::Pool => self.run_pool(partitioner.clone(), &stop_flag),
            SchedulerKind::Rayon => self.run_rayon(partitioner.clone(), &stop_flag),
        };
        let outcome = outcome.unwrap_or_else(|| self.run_inline(partitioner, &stop_flag));

        debug_assert_eq!(outcome.units_dispatched, outcome.aggregator.units_reported());
        debug!(
            units = outcome.units_dispatched,
            factor_found = outcome.aggregator.factor_found(),
            execution = %outcome.execution,
            "search complete"
        );

        outcome
    }

    /// Threads worth starting for `partitioner`: never more than its unit count
    fn thread_count(&self, partitioner: &Partitioner) -> usize {
        let units = usize::try_from(partitioner.unit_count()).unwrap_or(usize::MAX);
        self.config.threads.min(units).max(1)
    }

    /// Crossbeam worker pool
    ///
    /// Returns `None` without consuming any work if no worker thread could be
    /// spawned. Units lost to workers that exited early are scanned inline
    /// before returning.
    fn run_pool(&self, partitioner: Partitioner, stop_flag: &Arc<AtomicBool>) -> Option<SearchOutcome> {
        let threads = self.thread_count(&partitioner);
        let (unit_tx, unit_rx) = channel::bounded::<WorkUnit>(self.config.queue_depth);
        let (result_tx, result_rx) = channel::unbounded::<UnitResult>();

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(threads);
            for id in 0..threads {
                let worker = Worker::new(id, self.config.cancellation, Arc::clone(stop_flag));
                let units = unit_rx.clone();
                let results = result_tx.clone();

                let spawned = thread::Builder::new()
                    .name(format!("primality-worker-{}", id))
                    .spawn_scoped(scope, move || worker.run(units, results));

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => warn!(worker = id, error = %e, "failed to spawn worker thread"),
                }
            }

            // Workers hold the only remaining handles
            drop(unit_rx);
            drop(result_tx);

            if handles.is_empty() {
                warn!("no worker threads available, falling back to inline search");
                return None;
            }

            let mut aggregator = ResultAggregator::new();
            let mut dispatched = 0u64;
            // Dispatched units without a result yet
            let mut in_flight: HashMap<u64, WorkUnit> = HashMap::new();
            let mut undispatched = None;
            let mut units = partitioner.into_units();

            for unit in units.by_ref() {
                if stop_flag.load(Ordering::Relaxed) {
                    break;
                }
                in_flight.insert(unit.index, unit);
                if let Err(channel::SendError(unit)) = unit_tx.send(unit) {
                    // Every worker has exited
                    in_flight.remove(&unit.index);
                    undispatched = Some(unit);
                    break;
                }
                dispatched += 1;

                while let Ok(result) = result_rx.try_recv() {
                    in_flight.remove(&result.index);
                    aggregator.record(result);
                }
            }
            drop(unit_tx);

            // Wait for every outstanding result; the channel closes once all
            // workers have drained the queue and exited
            for result in result_rx.iter() {
                in_flight.remove(&result.index);
                aggregator.record(result);
            }

            let workers = handles.len();
            for handle in handles {
                if handle.join().is_err() {
                    warn!("worker thread panicked");
                }
            }

            if !in_flight.is_empty() || undispatched.is_some() {
                warn!(
                    lost = in_flight.len(),
                    "worker pool exited early, finishing search inline"
                );
                let remainder = undispatched.into_iter().chain(units);
                dispatched += self.recover_inline(&mut aggregator, in_flight.into_values(), remainder, stop_flag);
            }

            Some(SearchOutcome {
                aggregator,
                units_dispatched: dispatched,
                execution: Execution::Pool { workers },
            })
        })
    }

    /// Scan units the pool did not finish on the calling thread
    ///
    /// `lost` were already counted as dispatched; `remainder` were not.
    /// Returns how many units of `remainder` were executed.
    fn recover_inline(
        &self,
        aggregator: &mut ResultAggregator,
        lost: impl IntoIterator<Item = WorkUnit>,
        remainder: impl Iterator<Item = WorkUnit>,
        stop_flag: &Arc<AtomicBool>,
    ) -> u64 {
        let worker = Worker::new(0, self.config.cancellation, Arc::clone(stop_flag));
        for unit in lost {
            aggregator.record(worker.execute(unit));
        }

        let mut executed = 0;
        for unit in remainder {
            if worker.should_stop() {
                break;
            }
            aggregator.record(worker.execute(unit));
            executed += 1;
        }
        executed
    }

    /// Dedicated rayon pool
    ///
    /// Returns `None` without consuming any work if the pool cannot be built.
    fn run_rayon(&self, partitioner: Partitioner, stop_flag: &Arc<AtomicBool>) -> Option<SearchOutcome> {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.thread_count(&partitioner))
            .thread_name(|i| format!("primality-rayon-{}", i))
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, "failed to build rayon pool, falling back to inline search");
                return None;
            }
        };

        let cancellation = self.config.cancellation;
        let dispatched = AtomicU64::new(0);

        let aggregator = pool.install(|| {
            partitioner
                .into_units()
                .take_while(|_| !stop_flag.load(Ordering::Relaxed))
                .inspect(|_| {
                    dispatched.fetch_add(1, Ordering::Relaxed);
                })
                .par_bridge()
                .map_init(
                    || {
                        let id = rayon::current_thread_index().unwrap_or(0);
                        Worker::new(id, cancellation, Arc::clone(stop_flag))
                    },
                    |worker, unit| worker.execute(unit),
                )
                .fold(ResultAggregator::new, |mut aggregator, result| {
                    aggregator.record(result);
                    aggregator
                })
                .reduce(ResultAggregator::new, ResultAggregator::merge)
        });

        Some(SearchOutcome {
            aggregator,
            units_dispatched: dispatched.into_inner(),
            execution: Execution::Rayon {
                threads: pool.current_num_threads(),
            },
        })
    }

    /// Calling thread only
    fn run_inline(&self, partitioner: Partitioner, stop_flag: &Arc<AtomicBool>) -> SearchOutcome {
        let worker = Worker::new(0, self.config.cancellation, Arc::clone(stop_flag));
        let mut aggregator = ResultAggregator::new();
        let mut dispatched = 0u64;

        for unit in partitioner.into_units() {
            if worker.should_stop() {
                break;
            }
            aggregator.record(worker.execute(unit));
            dispatched += 1;
        }

        SearchOutcome {
            aggregator,
            units_dispatched: dispatched,
            execution: Execution::Inline,
        }
    }
}
