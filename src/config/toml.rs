//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Config {
    // Override engine settings
    if let Some(chunk_size) = cli.chunk_size {
        config.engine.chunk_size = chunk_size;
    }
    if let Some(threads) = cli.threads {
        config.engine.threads = threads;
    }
    if let Some(queue_depth) = cli.queue_depth {
        config.engine.queue_depth = queue_depth;
    }
    if let Some(scheduler) = cli.scheduler {
        config.engine.scheduler = cli_convert::convert_scheduler_type(scheduler);
    }
    if cli.cancel_on_factor {
        config.engine.cancellation = cli_convert::convert_cancel_flag(true);
    }

    // Override output settings
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if cli.show_stats {
        config.output.show_stats = true;
    }
    if cli.per_worker {
        config.output.per_worker = true;
    }

    // Override runtime settings
    if cli.verify {
        config.runtime.verify = true;
    }
    if cli.dry_run {
        config.runtime.dry_run = true;
    }
    if cli.debug {
        config.runtime.debug = true;
    }

    config
}

/// Build the effective configuration: config file (if any) merged with CLI flags
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };

    Ok(merge_cli_with_config(cli, base))
}
