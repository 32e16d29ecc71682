#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use std::process;

use crate::config::{Cli, Command};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "pyu_gcs_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "pyu_gcs_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "pyu_gcs_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "pyu_gcs_cli::command";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        let error = format!("{error:#}");
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();

    match &cli.command {
        Command::Configure { non_interactive } => {
            commands::configure(&cli.config, *non_interactive)
        }
        Command::Upload { files } => commands::upload(&cli.config, cli.connector(), files).await,
    }
}
