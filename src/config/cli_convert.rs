//! CLI to Config conversion utilities

use crate::config::cli;
use crate::config::{Cancellation, SchedulerKind};

/// Convert CLI SchedulerType to config SchedulerKind
pub fn convert_scheduler_type(cli_type: cli::SchedulerType) -> SchedulerKind {
    match cli_type {
        cli::SchedulerType::Pool => SchedulerKind::Pool,
        cli::SchedulerType::Rayon => SchedulerKind::Rayon,
    }
}

/// Convert the `--cancel-on-factor` flag to a cancellation policy
pub fn convert_cancel_flag(cancel_on_factor: bool) -> Cancellation {
    if cancel_on_factor {
        Cancellation::FirstFactor
    } else {
        Cancellation::RunToCompletion
    }
}
