//! JSON output formatting
//!
//! One report per run: the effective configuration, one entry per tested
//! number and one entry per rejected input.

use crate::config::Config;
use crate::engine::{Resolution, TestReport, Verdict};
use crate::input::InputError;
use crate::stats::WorkerStats;
use crate::util::time::format_duration;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            micros: d.as_micros() as u64,
            human: format_duration(d),
        }
    }
}

/// Statistics for one worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonWorkerStats {
    pub worker_id: usize,
    pub units_scanned: u64,
    pub units_cancelled: u64,
    pub candidates_tested: u64,
    pub factors_found: u64,
    pub busy_time: JsonDuration,
}

impl JsonWorkerStats {
    pub fn new(worker_id: usize, stats: &WorkerStats) -> Self {
        Self {
            worker_id,
            units_scanned: stats.units_scanned(),
            units_cancelled: stats.units_cancelled(),
            candidates_tested: stats.candidates_tested(),
            factors_found: stats.factors_found(),
            busy_time: JsonDuration::from_duration(stats.busy_time()),
        }
    }
}

/// Outcome of testing one number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonTestResult {
    /// Input as given
    pub input: String,
    pub n: u64,
    pub verdict: Verdict,
    pub resolution: Resolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divisor: Option<u64>,
    pub chunk_size: u64,
    pub units_dispatched: u64,
    pub units_cancelled: u64,
    pub candidates_tested: u64,
    pub elapsed: JsonDuration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_worker: Option<Vec<JsonWorkerStats>>,
}

impl JsonTestResult {
    pub fn from_report(input: &str, report: &TestReport, per_worker: bool) -> Self {
        let per_worker = per_worker.then(|| {
            report
                .per_worker
                .iter()
                .map(|(id, stats)| JsonWorkerStats::new(*id, stats))
                .collect()
        });

        Self {
            input: input.trim().to_string(),
            n: report.n,
            verdict: report.verdict,
            resolution: report.resolution,
            execution: report.execution.map(|e| e.to_string()),
            divisor: report.divisor,
            chunk_size: report.chunk_size,
            units_dispatched: report.units_dispatched,
            units_cancelled: report.totals.units_cancelled(),
            candidates_tested: report.totals.candidates_tested(),
            elapsed: JsonDuration::from_duration(report.elapsed),
            per_worker,
        }
    }
}

/// Input that could not be tested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonInputError {
    pub input: String,
    pub error: String,
}

/// Top-level JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRunReport {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub version: String,
    pub config: Config,
    pub results: Vec<JsonTestResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonInputError>,
}

impl JsonRunReport {
    pub fn new(config: &Config) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: config.clone(),
            results: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn push_result(&mut self, input: &str, report: &TestReport) {
        let per_worker = self.config.output.per_worker;
        self.results.push(JsonTestResult::from_report(input, report, per_worker));
    }

    pub fn push_error(&mut self, error: &InputError) {
        self.errors.push(JsonInputError {
            input: error.input().to_string(),
            error: error.to_string(),
        });
    }
}

/// Write JSON output to file
pub fn write_json_output(output_path: &Path, report: &JsonRunReport, pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, report)?;
    } else {
        serde_json::to_writer(&mut writer, report)?;
    }
    writer.flush()?;

    Ok(())
}
