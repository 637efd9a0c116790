//! Human-readable text output

use crate::config::Config;
use crate::engine::TestReport;
use crate::stats::WorkerStats;
use crate::util::time::{format_count, format_duration, format_rate};

/// Print the effective configuration
pub fn print_configuration(config: &Config) {
    println!("Configuration:");
    println!("  Engine:");
    println!("    Scheduler: {}", config.engine.scheduler);
    println!("    Threads: {}", config.engine.threads);
    println!("    Chunk size: {}", config.engine.chunk_size);
    println!("    Queue depth: {}", config.engine.queue_depth);
    println!("    Cancellation: {}", config.engine.cancellation);
    println!("  Output: {}", config.output);
    println!("  Runtime: {}", config.runtime);
}

/// Print the statistics section for one tested number
///
/// Worker rows are only printed when `per_worker` is set and at least one
/// worker took part.
pub fn print_report(report: &TestReport, per_worker: bool) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    SEARCH RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    println!("Number:      {}", report.n);
    println!("Verdict:     {}", report.verdict);
    println!("Resolution:  {}", report.resolution);
    if let Some(divisor) = report.divisor {
        println!("Divisor:     {}", divisor);
    }
    println!("Elapsed:     {}", format_duration(report.elapsed));
    println!();

    if let Some(execution) = report.execution {
        let totals = &report.totals;

        println!("Search:");
        println!("  Execution:  {}", execution);
        println!("  Chunk size: {}", format_count(report.chunk_size));
        println!("  Dispatched: {} units", format_count(report.units_dispatched));
        println!("  Scanned:    {} units", format_count(totals.units_scanned()));
        if totals.units_cancelled() > 0 {
            println!("  Cancelled:  {} units", format_count(totals.units_cancelled()));
        }
        println!(
            "  Candidates: {} ({}/s per busy worker)",
            format_count(totals.candidates_tested()),
            format_rate(totals.candidates_per_sec())
        );
        println!("  Factors:    {} unit(s) found one", format_count(totals.factors_found()));
        println!();

        if per_worker && !report.per_worker.is_empty() {
            println!("Workers:");
            for (id, stats) in &report.per_worker {
                print_worker_line(*id, stats);
            }
            println!();
        }
    }

    println!("═══════════════════════════════════════════════════════════");
}

fn print_worker_line(id: usize, stats: &WorkerStats) {
    println!(
        "  [{:>3}] {} scanned, {} cancelled, {} candidates, busy {}",
        id,
        format_count(stats.units_scanned()),
        format_count(stats.units_cancelled()),
        format_count(stats.candidates_tested()),
        format_duration(stats.busy_time())
    );
}
