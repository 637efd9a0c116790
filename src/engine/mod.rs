//! Primality engine
//!
//! Entry point of the crate. [`PrimalityTester`] resolves the trivial cases
//! itself and hands everything else to the partitioner and coordinator:
//!
//! 1. `n < 2` is not prime; 2 and 3 are prime; other even numbers are not.
//! 2. The odd candidates of `[3, n/2]` are split into chunks.
//! 3. If there are no candidates the number is prime and nothing is dispatched.
//! 4. Otherwise the chunks are scanned concurrently and the verdict is the
//!    negation of "some chunk found a factor".
//!
//! # Example
//!
//! ```
//! use primality::engine::{is_prime, PrimalityTester, Resolution, Verdict};
//! use primality::config::EngineConfig;
//!
//! assert!(is_prime(17));
//! assert!(!is_prime(91));
//!
//! let tester = PrimalityTester::new(EngineConfig { threads: 2, ..Default::default() })?;
//! let report = tester.test(91);
//! assert_eq!(report.verdict, Verdict::NotPrime);
//! assert_eq!(report.resolution, Resolution::Searched);
//! assert_eq!(report.divisor, Some(7));
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::validator::validate_engine;
use crate::config::EngineConfig;
use crate::coordinator::{Coordinator, Execution};
use crate::search::partition::Partitioner;
use crate::stats::WorkerStats;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Final answer for one number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Prime,
    NotPrime,
}

impl Verdict {
    #[inline]
    pub fn is_prime(self) -> bool {
        self == Verdict::Prime
    }
}

impl From<bool> for Verdict {
    fn from(is_prime: bool) -> Self {
        if is_prime {
            Verdict::Prime
        } else {
            Verdict::NotPrime
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Prime => write!(f, "prime"),
            Verdict::NotPrime => write!(f, "not prime"),
        }
    }
}

/// How a verdict was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Decided without searching (`n < 4` or even)
    Trivial,
    /// `n/2 < 3`: no candidate divisors exist, nothing dispatched
    EmptySearchSpace,
    /// Decided by the concurrent search
    Searched,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Trivial => write!(f, "trivial"),
            Resolution::EmptySearchSpace => write!(f, "empty search space"),
            Resolution::Searched => write!(f, "searched"),
        }
    }
}

/// Everything known about one test
#[derive(Debug, Clone)]
pub struct TestReport {
    /// Number under test
    pub n: u64,
    pub verdict: Verdict,
    pub resolution: Resolution,
    /// Scheduler path taken, when a search ran
    pub execution: Option<Execution>,
    /// Chunk size used for the search
    pub chunk_size: u64,
    /// Work units dispatched to workers
    pub units_dispatched: u64,
    /// A divisor of `n` when one is known
    ///
    /// When every unit was scanned this is the smallest divisor above 1.
    pub divisor: Option<u64>,
    /// Statistics summed over all workers
    pub totals: WorkerStats,
    /// Per-worker statistics sorted by worker ID
    pub per_worker: Vec<(usize, WorkerStats)>,
    /// Wall-clock time for the whole test
    pub elapsed: Duration,
}

impl TestReport {
    pub fn is_prime(&self) -> bool {
        self.verdict.is_prime()
    }

    fn without_search(n: u64, verdict: Verdict, resolution: Resolution, chunk_size: u64, elapsed: Duration) -> Self {
        let divisor = if n > 2 && n % 2 == 0 { Some(2) } else { None };
        Self {
            n,
            verdict,
            resolution,
            execution: None,
            chunk_size,
            units_dispatched: 0,
            divisor,
            totals: WorkerStats::new(),
            per_worker: Vec::new(),
            elapsed,
        }
    }
}

/// Verdict for numbers that need no search, or `None` for odd `n >= 5`
///
/// ```
/// use primality::engine::{trivial_verdict, Verdict};
///
/// assert_eq!(trivial_verdict(1), Some(Verdict::NotPrime));
/// assert_eq!(trivial_verdict(2), Some(Verdict::Prime));
/// assert_eq!(trivial_verdict(3), Some(Verdict::Prime));
/// assert_eq!(trivial_verdict(18), Some(Verdict::NotPrime));
/// assert_eq!(trivial_verdict(17), None);
/// ```
pub fn trivial_verdict(n: u64) -> Option<Verdict> {
    match n {
        0 | 1 => Some(Verdict::NotPrime),
        2 | 3 => Some(Verdict::Prime),
        _ if n % 2 == 0 => Some(Verdict::NotPrime),
        _ => None,
    }
}

/// Concurrent trial-division primality tester
///
/// Holds only configuration; every call to [`test`](Self::test) creates and
/// discards its own partition, workers and aggregator.
#[derive(Debug, Clone)]
pub struct PrimalityTester {
    coordinator: Coordinator,
}

impl PrimalityTester {
    /// Create a tester from a validated engine configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        validate_engine(&config)?;
        Ok(Self {
            coordinator: Coordinator::new(config),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        self.coordinator.config()
    }

    /// Returns true if `n` is prime
    pub fn is_prime(&self, n: u64) -> bool {
        self.test(n).is_prime()
    }

    /// Test `n` and report how the verdict was reached
    pub fn test(&self, n: u64) -> TestReport {
        let start = Instant::now();
        let chunk_size = self.config().chunk_size;

        if let Some(verdict) = trivial_verdict(n) {
            debug!(n, %verdict, "trivial case");
            return TestReport::without_search(n, verdict, Resolution::Trivial, chunk_size, start.elapsed());
        }

        let partitioner = Partitioner::new(n, chunk_size);
        if partitioner.is_exhausted() {
            debug!(n, "no candidate divisors");
            return TestReport::without_search(
                n,
                Verdict::Prime,
                Resolution::EmptySearchSpace,
                chunk_size,
                start.elapsed(),
            );
        }

        let outcome = self.coordinator.search(partitioner);
        let aggregator = &outcome.aggregator;

        let per_worker = aggregator
            .worker_ids()
            .into_iter()
            .filter_map(|id| aggregator.worker_stats(id).map(|stats| (id, stats.clone())))
            .collect();

        TestReport {
            n,
            verdict: aggregator.verdict(),
            resolution: Resolution::Searched,
            execution: Some(outcome.execution),
            chunk_size,
            units_dispatched: outcome.units_dispatched,
            divisor: aggregator.smallest_factor(),
            totals: aggregator.totals(),
            per_worker,
            elapsed: start.elapsed(),
        }
    }
}

impl Default for PrimalityTester {
    /// Tester with [`EngineConfig::default`]
    fn default() -> Self {
        Self {
            coordinator: Coordinator::new(EngineConfig::default()),
        }
    }
}

/// Returns true if `n` is prime, using the default engine configuration
pub fn is_prime(n: u64) -> bool {
    PrimalityTester::default().is_prime(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Cancellation, SchedulerKind};
    use crate::search::sequential::is_prime_sequential;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn tester(scheduler: SchedulerKind, cancellation: Cancellation, chunk_size: u64) -> PrimalityTester {
        PrimalityTester::new(EngineConfig {
            chunk_size,
            threads: 4,
            queue_depth: 16,
            scheduler,
            cancellation,
        })
        .expect("valid engine config")
    }

    #[test]
    fn test_below_two_not_prime() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
    }

    #[test]
    fn test_two_and_three_prime() {
        assert!(is_prime(2));
        assert!(is_prime(3));
    }

    #[test]
    fn test_even_numbers_not_prime() {
        let tester = PrimalityTester::default();
        for n in (4..1_000u64).step_by(2) {
            let report = tester.test(n);
            assert!(!report.is_prime(), "n={}", n);
            assert_eq!(report.resolution, Resolution::Trivial);
            assert_eq!(report.divisor, Some(2));
        }
        assert!(!tester.is_prime(u64::MAX - 1));
    }

    #[test]
    fn test_concrete_scenarios() {
        assert!(is_prime(17));
        assert!(!is_prime(18));
        assert!(is_prime(97));
        assert!(!is_prime(91));
        assert!(!is_prime(1));
        assert!(is_prime(2));
    }

    #[test]
    fn test_empty_search_space_dispatches_nothing() {
        let report = PrimalityTester::default().test(5);
        assert!(report.is_prime());
        assert_eq!(report.resolution, Resolution::EmptySearchSpace);
        assert_eq!(report.units_dispatched, 0);
        assert!(report.execution.is_none());
    }

    #[test]
    fn test_boundary_small_odd_numbers() {
        let tester = PrimalityTester::default();
        // 7/2 = 3 and 9/2 = 4 both search exactly {3}
        let seven = tester.test(7);
        assert!(seven.is_prime());
        assert_eq!(seven.units_dispatched, 1);

        let nine = tester.test(9);
        assert!(!nine.is_prime());
        assert_eq!(nine.divisor, Some(3));

        assert!(tester.is_prime(11));
        assert!(!tester.is_prime(15));
        assert!(!tester.is_prime(25));
    }

    #[test]
    fn test_report_search_details() {
        let tester = tester(SchedulerKind::Pool, Cancellation::RunToCompletion, 50);
        let report = tester.test(97);
        assert_eq!(report.resolution, Resolution::Searched);
        assert_eq!(report.units_dispatched, 1);
        assert_eq!(report.totals.candidates_tested(), 23); // 3..=47
        assert_eq!(report.divisor, None);
        assert_eq!(report.chunk_size, 50);
        let per_worker_units: u64 = report.per_worker.iter().map(|(_, s)| s.total_units()).sum();
        assert_eq!(per_worker_units, 1);
    }

    #[test]
    fn test_matches_sequential_reference_full_range() {
        let tester = tester(SchedulerKind::Pool, Cancellation::FirstFactor, 50);
        for n in 0..100_000u64 {
            assert_eq!(tester.is_prime(n), is_prime_sequential(n), "n={}", n);
        }
    }

    #[test]
    fn test_matches_sequential_reference_all_configurations() {
        for scheduler in [SchedulerKind::Pool, SchedulerKind::Rayon] {
            for cancellation in [Cancellation::RunToCompletion, Cancellation::FirstFactor] {
                for chunk_size in [1, 7, 50] {
                    let tester = tester(scheduler, cancellation, chunk_size);
                    for n in 0..2_000u64 {
                        assert_eq!(
                            tester.is_prime(n),
                            is_prime_sequential(n),
                            "n={} scheduler={} cancellation={} chunk_size={}",
                            n,
                            scheduler,
                            cancellation,
                            chunk_size
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_default_config_matches_reference() {
        let tester = PrimalityTester::default();
        for n in 0..20_000u64 {
            assert_eq!(tester.is_prime(n), is_prime_sequential(n), "n={}", n);
        }
    }

    #[test]
    fn test_run_to_completion_reports_smallest_divisor() {
        let tester = tester(SchedulerKind::Rayon, Cancellation::RunToCompletion, 5);
        // 3_127 = 53 * 59
        let report = tester.test(3_127);
        assert_eq!(report.verdict, Verdict::NotPrime);
        assert_eq!(report.divisor, Some(53));
        assert_eq!(report.totals.units_cancelled(), 0);
    }

    #[test]
    fn test_large_semiprimes_and_primes() {
        let tester = tester(SchedulerKind::Pool, Cancellation::FirstFactor, 1_000);
        assert!(tester.is_prime(1_000_003));
        assert!(!tester.is_prime(1_000_003 * 3));
        // 999_983 * 1_000_003 has no factor below 999_983
        let report = tester.test(999_983 * 1_000_003);
        assert_eq!(report.verdict, Verdict::NotPrime);
        assert_eq!(report.divisor.map(|d| (999_983 * 1_000_003) % d), Some(0));
    }

    #[test]
    fn test_random_odd_numbers_match_reference() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed);
        let tester = tester(SchedulerKind::Pool, Cancellation::FirstFactor, 50);
        for _ in 0..200 {
            let n = rng.gen_range(100_000u64..5_000_000) | 1;
            assert_eq!(tester.is_prime(n), is_prime_sequential(n), "n={}", n);
        }
    }

    #[test]
    fn test_idempotent() {
        let tester = PrimalityTester::default();
        for n in [1u64, 2, 91, 97, 7_919, 7_921, 65_537] {
            let first = tester.is_prime(n);
            for _ in 0..5 {
                assert_eq!(tester.is_prime(n), first, "n={}", n);
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(PrimalityTester::new(config).is_err());
    }

    #[test]
    fn test_verdict_conversions() {
        assert_eq!(Verdict::from(true), Verdict::Prime);
        assert_eq!(Verdict::from(false), Verdict::NotPrime);
        assert_eq!(Verdict::Prime.to_string(), "prime");
        assert_eq!(Verdict::NotPrime.to_string(), "not prime");
        assert_eq!(Resolution::EmptySearchSpace.to_string(), "empty search space");
    }
}
