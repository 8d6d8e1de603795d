//! slashparam command-line entry point.

mod args;
mod run;

use std::process::ExitCode;

use clap::Parser;
use slashparam_core::ParameterError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::{CliOptions, LogLevel};

fn init_tracing(level: LogLevel) {
    let filter = match level {
        LogLevel::Debug => "slashparam=debug,slashparam_core=debug",
        LogLevel::Normal => "slashparam=warn,slashparam_core=warn",
        LogLevel::Quiet => "slashparam=error,slashparam_core=error",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let options = CliOptions::parse().into_run_options()?;
    init_tracing(options.log_level);

    let mut registry = run::build_registry(&options)?;

    match run::render(&mut registry, &options) {
        Ok(output) => {
            print!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if !err.is::<ParameterError>() {
                return Err(err);
            }
            debug!(error = %err, "Failed to process parameters");
            eprintln!("{}", err);
            if let Ok(usage) = registry.generate_usage_message(&options.program) {
                eprint!("{}", usage);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
