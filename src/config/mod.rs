//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::search::partition::DEFAULT_CHUNK_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Odd candidates per work unit
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,
    /// Worker pool size
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Capacity of the bounded work queue
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
    /// How work units are scheduled onto threads
    #[serde(default)]
    pub scheduler: SchedulerKind,
    /// What happens to outstanding units once a factor is found
    #[serde(default)]
    pub cancellation: Cancellation,
}

fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

fn default_threads() -> usize {
    num_cpus::get()
}

fn default_queue_depth() -> usize {
    64
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            threads: default_threads(),
            queue_depth: default_queue_depth(),
            scheduler: SchedulerKind::default(),
            cancellation: Cancellation::default(),
        }
    }
}

/// Scheduler backing the worker pool
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerKind {
    /// Fixed pool of threads fed through a bounded crossbeam channel
    #[default]
    Pool,
    /// Dedicated rayon thread pool bridging the partitioner
    Rayon,
}

/// Cancellation policy for outstanding work
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Cancellation {
    /// Scan every range even after a factor is known
    #[default]
    RunToCompletion,
    /// Stop dispatching and skip queued units once any factor is found
    FirstFactor,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON report path
    pub json_output: Option<PathBuf>,
    /// Print the run report after each verdict
    #[serde(default)]
    pub show_stats: bool,
    /// Include per-worker statistics in reports
    #[serde(default)]
    pub per_worker: bool,
}

/// Runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Cross-check every verdict against the sequential reference
    #[serde(default)]
    pub verify: bool,
    /// Validate and print configuration without testing anything
    #[serde(default)]
    pub dry_run: bool,
    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

// Display trait implementations

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Engine: {}", self.engine)?;
        writeln!(f, "  Output: {}", self.output)?;
        writeln!(f, "  Runtime: {}", self.runtime)?;
        Ok(())
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scheduler, {} thread(s), chunk_size={}, queue_depth={}, cancellation={}",
            self.scheduler, self.threads, self.chunk_size, self.queue_depth, self.cancellation
        )
    }
}

impl fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerKind::Pool => write!(f, "pool"),
            SchedulerKind::Rayon => write!(f, "rayon"),
        }
    }
}

impl fmt::Display for Cancellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cancellation::RunToCompletion => write!(f, "run_to_completion"),
            Cancellation::FirstFactor => write!(f, "first_factor"),
        }
    }
}

impl fmt::Display for OutputConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref path) = self.json_output {
            parts.push(format!("json={}", path.display()));
        }
        if self.show_stats {
            parts.push("stats".to_string());
        }
        if self.per_worker {
            parts.push("per_worker".to_string());
        }
        if parts.is_empty() {
            write!(f, "text output")
        } else {
            write!(f, "text output, {}", parts.join(", "))
        }
    }
}

impl fmt::Display for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.verify {
            parts.push("verify");
        }
        if self.dry_run {
            parts.push("dry_run");
        }
        if self.debug {
            parts.push("debug");
        }
        if parts.is_empty() {
            write!(f, "default")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}
