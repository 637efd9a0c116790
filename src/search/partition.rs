//! Work partitioning
//!
//! Splits the odd candidate divisors of `[3, n/2]` into contiguous chunks.
//! The partitioner is a lazy iterator: ranges are produced on demand, so the
//! number of chunks for a large `n` never has to fit in memory.
//!
//! # Example
//!
//! ```
//! use primality::search::partition::Partitioner;
//!
//! // n = 301: search space is the odd numbers in [3, 150], i.e. 3..=149
//! let ranges: Vec<_> = Partitioner::new(301, 50)
//!     .map(|r| (r.start(), r.end()))
//!     .collect();
//! assert_eq!(ranges, vec![(3, 101), (103, 149)]);
//! ```

use super::{CandidateRange, WorkUnit};

/// Default number of odd candidates per work unit
pub const DEFAULT_CHUNK_SIZE: u64 = 50;

/// Lazy sequence of candidate ranges covering `[3, n/2]`
#[derive(Debug, Clone)]
pub struct Partitioner {
    n: u64,
    /// Next range start, `None` once exhausted
    next_start: Option<u64>,
    /// Largest odd candidate (inclusive)
    last: u64,
    /// Distance from a range start to its end (`2 * (chunk_size - 1)`)
    span: u64,
    chunk_size: u64,
    next_index: u64,
}

impl Partitioner {
    /// Create a partitioner for `n` with `chunk_size` odd candidates per range
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero. Configuration validation rejects zero
    /// before an engine is ever built.
    pub fn new(n: u64, chunk_size: u64) -> Self {
        assert!(chunk_size > 0, "chunk_size must be at least 1");

        let (next_start, last) = match Self::search_bounds(n) {
            Some((first, last)) => (Some(first), last),
            None => (None, 0),
        };

        Self {
            n,
            next_start,
            last,
            span: (chunk_size - 1).saturating_mul(2),
            chunk_size,
            next_index: 0,
        }
    }

    /// First and last odd candidate to test for `n`, or `None` if there are none
    ///
    /// The search space is `[3, n/2]` with truncating division; the upper
    /// bound is rounded down to an odd number.
    ///
    /// ```
    /// use primality::search::partition::Partitioner;
    ///
    /// assert_eq!(Partitioner::search_bounds(5), None);      // 5/2 = 2
    /// assert_eq!(Partitioner::search_bounds(7), Some((3, 3)));
    /// assert_eq!(Partitioner::search_bounds(9), Some((3, 3))); // 9/2 = 4
    /// assert_eq!(Partitioner::search_bounds(97), Some((3, 47)));
    /// ```
    pub fn search_bounds(n: u64) -> Option<(u64, u64)> {
        let half = n / 2;
        if half < 3 {
            return None;
        }
        let last = if half % 2 == 1 { half } else { half - 1 };
        Some((3, last))
    }

    /// Number under test
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Configured chunk size (odd candidates per range)
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Number of ranges not yet produced
    pub fn unit_count(&self) -> u64 {
        match self.next_start {
            Some(start) => {
                let odd_candidates = (self.last - start) / 2 + 1;
                odd_candidates.div_ceil(self.chunk_size)
            }
            None => 0,
        }
    }

    /// Whether the search space is empty (no work will be dispatched)
    pub fn is_exhausted(&self) -> bool {
        self.next_start.is_none()
    }

    /// Adapt into an iterator of work units bound to `n`
    pub fn into_units(self) -> WorkUnits {
        WorkUnits { inner: self }
    }

    fn next_range(&mut self) -> Option<(u64, CandidateRange)> {
        let start = self.next_start?;
        let end = start.saturating_add(self.span).min(self.last);

        self.next_start = if end < self.last { Some(end + 2) } else { None };

        let index = self.next_index;
        self.next_index += 1;
        Some((index, CandidateRange::new(start, end)))
    }
}

impl Iterator for Partitioner {
    type Item = CandidateRange;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_range().map(|(_, range)| range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.unit_count();
        match usize::try_from(remaining) {
            Ok(count) => (count, Some(count)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Iterator of [`WorkUnit`]s produced by [`Partitioner::into_units`]
#[derive(Debug, Clone)]
pub struct WorkUnits {
    inner: Partitioner,
}

impl Iterator for WorkUnits {
    type Item = WorkUnit;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.inner.n;
        self.inner
            .next_range()
            .map(|(index, range)| WorkUnit::new(index, range, n))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Check the coverage invariants for one `n` and chunk size
    fn assert_exact_cover(n: u64, chunk_size: u64) {
        let partitioner = Partitioner::new(n, chunk_size);
        let expected_units = partitioner.unit_count();
        let ranges: Vec<CandidateRange> = partitioner.collect();

        assert_eq!(ranges.len() as u64, expected_units, "unit_count for n={}", n);

        match Partitioner::search_bounds(n) {
            None => assert!(ranges.is_empty(), "n={} should have no ranges", n),
            Some((first, last)) => {
                assert_eq!(ranges.first().map(|r| r.start()), Some(first));
                assert_eq!(ranges.last().map(|r| r.end()), Some(last));
                assert!(last <= n / 2);
                assert!(last + 2 > n / 2);

                for range in &ranges {
                    assert_eq!(range.start() % 2, 1);
                    assert_eq!(range.end() % 2, 1);
                    assert!(range.len() <= chunk_size);
                }
                for pair in ranges.windows(2) {
                    assert_eq!(pair[1].start(), pair[0].end() + 2, "gap or overlap for n={}", n);
                    assert_eq!(pair[0].len(), chunk_size, "only the final range may be short");
                }
            }
        }
    }

    #[test]
    fn test_degenerate_small_numbers() {
        for n in 0..=5 {
            let partitioner = Partitioner::new(n, DEFAULT_CHUNK_SIZE);
            assert!(partitioner.is_exhausted(), "n={}", n);
            assert_eq!(partitioner.unit_count(), 0);
            assert_eq!(partitioner.count(), 0);
        }
    }

    #[test]
    fn test_boundary_six_and_seven() {
        // 6/2 = 3 and 7/2 = 3: exactly one candidate
        for n in [6, 7] {
            let ranges: Vec<_> = Partitioner::new(n, DEFAULT_CHUNK_SIZE).collect();
            assert_eq!(ranges, vec![CandidateRange::new(3, 3)], "n={}", n);
        }
    }

    #[test]
    fn test_even_half_rounds_down() {
        // 9/2 = 4 -> last odd candidate is 3
        let ranges: Vec<_> = Partitioner::new(9, DEFAULT_CHUNK_SIZE).collect();
        assert_eq!(ranges, vec![CandidateRange::new(3, 3)]);
    }

    #[test]
    fn test_reference_chunk_spans_one_hundred_integers() {
        let first = Partitioner::new(1_000_001, DEFAULT_CHUNK_SIZE)
            .next()
            .expect("non-empty search space");
        assert_eq!(first, CandidateRange::new(3, 101));
        assert_eq!(first.len(), 50);
    }

    #[test]
    fn test_final_range_clipped() {
        let ranges: Vec<_> = Partitioner::new(97, 10).collect();
        // odd candidates 3..=47: 23 of them -> 10 + 10 + 3
        assert_eq!(
            ranges,
            vec![
                CandidateRange::new(3, 21),
                CandidateRange::new(23, 41),
                CandidateRange::new(43, 47),
            ]
        );
    }

    #[test]
    fn test_chunk_size_one() {
        let ranges: Vec<_> = Partitioner::new(31, 1).collect();
        let starts: Vec<_> = ranges.iter().map(|r| r.start()).collect();
        assert_eq!(starts, vec![3, 5, 7, 9, 11, 13, 15]);
        assert!(ranges.iter().all(|r| r.start() == r.end()));
    }

    #[test]
    fn test_exact_cover_many_numbers() {
        for n in 0..2_000u64 {
            for chunk_size in [1, 2, 3, 7, 50, 1_000] {
                assert_exact_cover(n, chunk_size);
            }
        }
    }

    #[test]
    fn test_huge_chunk_size_does_not_overflow() {
        let ranges: Vec<_> = Partitioner::new(u64::MAX, u64::MAX).collect();
        let last = (u64::MAX / 2) | 1;
        assert_eq!(ranges, vec![CandidateRange::new(3, last)]);
    }

    #[test]
    fn test_unit_count_for_max_n() {
        let partitioner = Partitioner::new(u64::MAX, DEFAULT_CHUNK_SIZE);
        // u64::MAX / 2 = 2^63 - 1 (odd), odd candidates 3..=2^63-1
        let odd_candidates = ((u64::MAX / 2) - 3) / 2 + 1;
        assert_eq!(partitioner.unit_count(), odd_candidates.div_ceil(DEFAULT_CHUNK_SIZE));
    }

    #[test]
    fn test_unit_count_decreases() {
        let mut partitioner = Partitioner::new(10_001, 50);
        let total = partitioner.unit_count();
        partitioner.next();
        assert_eq!(partitioner.unit_count(), total - 1);
    }

    #[test]
    fn test_into_units_indices_and_target() {
        let units: Vec<_> = Partitioner::new(1_001, 50).into_units().collect();
        assert!(!units.is_empty());
        for (i, unit) in units.iter().enumerate() {
            assert_eq!(unit.index, i as u64);
            assert_eq!(unit.n, 1_001);
        }
    }

    #[test]
    #[should_panic(expected = "chunk_size")]
    fn test_zero_chunk_size_rejected() {
        Partitioner::new(101, 0);
    }
}
