//! Trial-division search primitives
//!
//! This module holds the leaf pieces of the engine: the divisibility predicate,
//! the candidate range type and the range scanner. Everything here is a pure
//! function of its inputs and safe to call from any number of threads at once.
//!
//! # Example
//!
//! ```
//! use primality::search::{CandidateRange, factor_exists_in_range};
//!
//! // 91 = 7 * 13
//! let range = CandidateRange::new(3, 11);
//! assert!(factor_exists_in_range(range, 91));
//!
//! // 97 is prime, nothing in [3, 47] divides it
//! assert!(!factor_exists_in_range(CandidateRange::new(3, 47), 97));
//! ```

pub mod partition;
pub mod sequential;

use std::fmt;

/// Returns true if `x` evenly divides `y`
///
/// Integer modulo only. A zero divisor never divides anything.
#[inline]
pub fn divides(x: u64, y: u64) -> bool {
    x != 0 && y % x == 0
}

/// Inclusive range of odd candidate divisors
///
/// Both bounds are odd and `start <= end`. The partitioner is the only
/// producer in the engine; the constructor is public for tests and callers
/// that want to scan a range directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateRange {
    start: u64,
    end: u64,
}

impl CandidateRange {
    /// Create a range over the odd numbers in `[start, end]`
    ///
    /// # Panics
    ///
    /// Panics if either bound is even or `start > end`.
    pub fn new(start: u64, end: u64) -> Self {
        assert!(start % 2 == 1 && end % 2 == 1, "candidate bounds must be odd");
        assert!(start <= end, "candidate range start must not exceed end");
        Self { start, end }
    }

    /// First candidate in the range
    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last candidate in the range (inclusive)
    #[inline]
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of odd candidates in the range
    #[inline]
    pub fn len(&self) -> u64 {
        (self.end - self.start) / 2 + 1
    }

    /// Ranges are never empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the candidates `start, start + 2, ..., end`
    pub fn candidates(&self) -> impl Iterator<Item = u64> {
        (self.start..=self.end).step_by(2)
    }
}

impl fmt::Display for CandidateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// A candidate range bound to the number under test
///
/// One unit is executed by exactly one worker and never changes after it is
/// dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkUnit {
    /// Position of the range in partition order (0-based)
    pub index: u64,
    /// Candidate divisors to test
    pub range: CandidateRange,
    /// Number under test
    pub n: u64,
}

impl WorkUnit {
    pub fn new(index: u64, range: CandidateRange, n: u64) -> Self {
        Self { index, range, n }
    }
}

/// Outcome of scanning one range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeScan {
    /// First candidate that divides the target, if any
    pub factor: Option<u64>,
    /// How many candidates were tested before the scan stopped
    pub candidates_tested: u64,
}

impl RangeScan {
    #[inline]
    pub fn factor_found(&self) -> bool {
        self.factor.is_some()
    }
}

/// Scan `range` for a divisor of `n`, stopping at the first hit
///
/// # Example
///
/// ```
/// use primality::search::{CandidateRange, scan_range};
///
/// let scan = scan_range(CandidateRange::new(3, 21), 91);
/// assert_eq!(scan.factor, Some(7));
/// assert_eq!(scan.candidates_tested, 3); // 3, 5, 7
/// ```
pub fn scan_range(range: CandidateRange, n: u64) -> RangeScan {
    let mut candidates_tested = 0;
    for candidate in range.candidates() {
        candidates_tested += 1;
        if divides(candidate, n) {
            return RangeScan {
                factor: Some(candidate),
                candidates_tested,
            };
        }
    }

    RangeScan {
        factor: None,
        candidates_tested,
    }
}

/// Returns true if any odd candidate in `range` divides `n`
pub fn factor_exists_in_range(range: CandidateRange, n: u64) -> bool {
    range.candidates().any(|candidate| divides(candidate, n))
}
