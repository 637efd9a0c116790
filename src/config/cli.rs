//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// primality - concurrent trial-division primality tester
#[derive(Parser, Debug)]
#[command(name = "primality")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Numbers to test (decimal, 64-bit unsigned)
    #[arg(value_name = "NUMBER")]
    pub numbers: Vec<String>,

    /// File with one number per line (blank lines and '#' comments skipped)
    #[arg(short = 'i', long)]
    pub input_file: Option<PathBuf>,

    // === Engine Options ===
    /// Odd candidates per work unit
    #[arg(long)]
    pub chunk_size: Option<u64>,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Capacity of the bounded work queue
    #[arg(short = 'q', long)]
    pub queue_depth: Option<usize>,

    /// Scheduler backing the worker pool
    #[arg(long, value_enum)]
    pub scheduler: Option<SchedulerType>,

    /// Stop scanning outstanding ranges once any factor is found
    #[arg(long)]
    pub cancel_on_factor: bool,

    // === Output Options ===
    /// JSON report file path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Print search statistics after each verdict
    #[arg(long)]
    pub show_stats: bool,

    /// Include per-worker statistics
    #[arg(long)]
    pub per_worker: bool,

    // === Runtime Options ===
    /// Cross-check every verdict against the sequential reference
    #[arg(long)]
    pub verify: bool,

    // === Configuration File ===
    /// TOML configuration file
    #[arg(short = 'c', long, env = "PRIMALITY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dry run - validate configuration without testing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Verbose logging (repeat for trace level)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Scheduler type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchedulerType {
    /// Fixed worker pool fed by a bounded channel
    Pool,
    /// Dedicated rayon thread pool
    Rayon,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.dry_run && self.numbers.is_empty() && self.input_file.is_none() {
            anyhow::bail!("must specify at least one NUMBER or --input-file");
        }

        if self.chunk_size == Some(0) {
            anyhow::bail!("chunk_size must be at least 1");
        }

        if self.threads == Some(0) {
            anyhow::bail!("threads must be at least 1");
        }

        if self.queue_depth == Some(0) {
            anyhow::bail!("queue_depth must be at least 1");
        }

        Ok(())
    }
}
