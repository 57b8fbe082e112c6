//! Main entry point for tscat.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tscat::{App, Args};
use tscat_common::{init_logging, LoggingOptions};
use tscat_config::{Config, ConfigLoader};

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = load_config(&args)?;
    init_logging(&LoggingOptions::from(&config.logging))
        .context("Failed to initialize logging")?;

    info!(command = args.command.name(), "Starting tscat");

    let app = App::new(config);
    match app.run(&args.command) {
        Ok(outcome) => {
            print!("{}", outcome.output);
            Ok(if outcome.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Err(e) => {
            error!("Command '{}' failed: {}", args.command.name(), e);
            Err(e).with_context(|| format!("tscat {} failed", args.command.name()))
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let path = args.config.as_deref();
    ConfigLoader::load_with(path, |config| args.apply_to(config)).with_context(|| match path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })
}
