//! Configuration validation

use super::*;
use anyhow::Result;

/// Upper bound on the worker pool size
pub const MAX_THREADS: usize = 1024;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_engine(&config.engine)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate engine configuration
pub fn validate_engine(engine: &EngineConfig) -> Result<()> {
    if engine.chunk_size == 0 {
        anyhow::bail!("chunk_size must be at least 1");
    }

    if engine.threads == 0 || engine.threads > MAX_THREADS {
        anyhow::bail!(
            "threads must be between 1 and {}, got {}",
            MAX_THREADS,
            engine.threads
        );
    }

    if engine.queue_depth == 0 {
        anyhow::bail!("queue_depth must be at least 1");
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if let Some(ref path) = output.json_output {
        if path.as_os_str().is_empty() {
            anyhow::bail!("json_output path must not be empty");
        }
        if path.is_dir() {
            anyhow::bail!("json_output must be a file path, got directory: {}", path.display());
        }
    }

    Ok(())
}
