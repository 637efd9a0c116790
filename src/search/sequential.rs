//! Single-threaded reference implementation
//!
//! Straightforward trial division over the same search space the concurrent
//! engine uses. It serves as the oracle for the engine's tests and for the
//! CLI's `--verify` mode.

use super::divides;

/// Sequential trial-division primality test
///
/// ```
/// use primality::search::sequential::is_prime_sequential;
///
/// assert!(is_prime_sequential(97));
/// assert!(!is_prime_sequential(91));
/// assert!(is_prime_sequential(2));
/// ```
pub fn is_prime_sequential(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 || n == 3 {
        return true;
    }
    if divides(2, n) {
        return false;
    }

    let half = n / 2;
    let mut candidate = 3;
    while candidate <= half {
        if divides(candidate, n) {
            return false;
        }
        candidate += 2;
    }

    true
}
