//! primality - concurrent trial-division primality testing
//!
//! Decides whether a 64-bit unsigned integer is prime by splitting the odd
//! candidate divisors of `[3, n/2]` into fixed-size ranges and scanning them
//! on a bounded pool of worker threads.
//!
//! # Architecture
//!
//! - **Search**: divisibility predicate, range scanner and the work partitioner
//! - **Worker / coordinator**: crossbeam worker pool or a dedicated rayon pool
//! - **Stats**: result aggregation and per-worker counters
//! - **Engine**: trivial cases and the public `is_prime` entry point
//!
//! ```
//! assert!(primality::is_prime(97));
//! assert!(!primality::is_prime(91));
//! ```

pub mod config;
pub mod coordinator;
pub mod engine;
pub mod input;
pub mod output;
pub mod search;
pub mod stats;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use engine::{is_prime, PrimalityTester, Verdict};

/// Result type used throughout primality
pub type Result<T> = anyhow::Result<T>;
