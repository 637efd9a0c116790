//! primality CLI entry point

use anyhow::{Context, Result};
use primality::config::{cli::Cli, toml::load_config, validator::validate_config};
use primality::engine::PrimalityTester;
use primality::input::{error_message, parse_candidate, read_inputs, verdict_message};
use primality::output::json::{write_json_output, JsonRunReport};
use primality::output::text::{print_configuration, print_report};
use primality::search::sequential::is_prime_sequential;
use primality::util::logging::init_logger;
use tracing::{debug, error, info};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.validate()?;

    let config = load_config(&cli)?;
    validate_config(&config).context("Configuration validation failed")?;

    init_logger(config.runtime.debug, cli.verbose);
    debug!(engine = %config.engine, "configuration loaded");

    if config.runtime.dry_run || config.output.show_stats {
        println!("primality v{}", env!("CARGO_PKG_VERSION"));
        println!();
        print_configuration(&config);
        println!();
    }

    if config.runtime.dry_run {
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    let mut inputs = cli.numbers.clone();
    if let Some(ref path) = cli.input_file {
        inputs.extend(read_inputs(path)?);
    }

    let tester = PrimalityTester::new(config.engine.clone())?;
    let mut json = config.output.json_output.as_ref().map(|_| JsonRunReport::new(&config));
    let mut rejected = 0usize;
    let mut mismatches = 0usize;

    for input in &inputs {
        let n = match parse_candidate(input) {
            Ok(n) => n,
            Err(e) => {
                println!("{}", error_message(&e));
                if let Some(ref mut json) = json {
                    json.push_error(&e);
                }
                rejected += 1;
                continue;
            }
        };

        let report = tester.test(n);
        println!("{}", verdict_message(input, report.verdict));

        if config.output.show_stats {
            print_report(&report, config.output.per_worker);
        }

        if config.runtime.verify {
            let expected = is_prime_sequential(n);
            if expected != report.is_prime() {
                error!(n, concurrent = %report.verdict, sequential = expected, "verdict mismatch");
                mismatches += 1;
            }
        }

        if let Some(ref mut json) = json {
            json.push_result(input, &report);
        }
    }

    if let (Some(json), Some(path)) = (json, config.output.json_output.as_ref()) {
        write_json_output(path, &json, true)?;
        info!(path = %path.display(), "JSON report written");
    }

    if mismatches > 0 {
        anyhow::bail!("{} verdict(s) disagreed with the sequential reference", mismatches);
    }
    if rejected > 0 {
        anyhow::bail!("{} input(s) could not be tested", rejected);
    }

    Ok(())
}
