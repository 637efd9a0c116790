//! Logging setup
//!
//! Diagnostics go through `tracing` to stderr so that stdout carries only
//! verdicts and reports. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a debug flag and verbosity count
pub fn default_filter(debug: bool, verbose: u8) -> &'static str {
    match (debug, verbose) {
        (_, v) if v >= 2 => "primality=trace,warn",
        (true, _) | (_, 1) => "primality=debug,warn",
        _ => "primality=warn",
    }
}

/// Install the global subscriber for the CLI
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logger(debug: bool, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug, verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_names(debug || verbose > 0)
                .compact(),
        )
        .try_init();
}
