//! Patchview CLI entry point.

use std::{process::ExitCode, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info};
use miette::GraphicalReportHandler;

use patchview_cli::{Args, error_adapter::render_reports};

/// Installs `env_logger` at the requested level, falling back to `warn`.
fn init_logger(level: &str) -> LevelFilter {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();

    filter
}

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = init_logger(&args.log_level);

    info!(log_level:?; "Starting Patchview");
    debug!(args:?; "Parsed arguments");

    match patchview_cli::run(&args) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            // Printed directly: diagnostics ignore the log filter.
            eprint!("{}", render_reports(&err, &GraphicalReportHandler::new()));
            ExitCode::FAILURE
        }
    }
}
