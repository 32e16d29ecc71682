//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── config: PathBuf         # Persisted uploader configuration (JSON)
//! ├── endpoint: Option<String> # Custom GCS endpoint
//! └── command: Command
//!     ├── configure            # Prompt for and persist settings
//!     └── upload <FILE>...     # Upload release artifacts
//! ```
//!
//! All options can be provided via CLI arguments or environment variables.
//!
//! # Example
//!
//! ```bash
//! pyu-gcs configure
//! PYU_GCS_BUCKET=releases pyu-gcs upload dist/app-1.2.0.zip
//! ```

mod prompt;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
pub use prompt::LinePrompt;
use pyu_gcs::client::GcsConnector;
use pyu_gcs::config::UploaderConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Default location of the persisted uploader configuration.
pub const DEFAULT_CONFIG_PATH: &str = ".pyu-gcs.json";

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "pyu-gcs")]
#[command(about = "Upload PyUpdater release artifacts to Google Cloud Storage")]
#[command(version)]
pub struct Cli {
    /// Path to the persisted uploader configuration.
    #[arg(long, short, env = "PYU_GCS_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Custom GCS endpoint URL (for testing with a fake GCS server).
    #[arg(long, env = "PYU_GCS_ENDPOINT")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Prompt for the bucket and credentials settings and persist them.
    Configure {
        /// Accept existing values and defaults without prompting.
        #[arg(long)]
        non_interactive: bool,
    },

    /// Upload release artifacts, one after another.
    Upload {
        /// Files to upload.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments so that its
    /// variables can be used as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Creates the GCS connector from CLI options.
    pub fn connector(&self) -> GcsConnector {
        match &self.endpoint {
            Some(endpoint) => GcsConnector::new().with_endpoint(endpoint),
            None => GcsConnector::new(),
        }
    }

    /// Logs build information and options at debug level.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            config = %self.config.display(),
            endpoint = ?self.endpoint,
            "CLI configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Loads the persisted uploader configuration.
///
/// A missing file yields an empty configuration so that environment
/// variables and prompts can fill it in.
pub fn load_uploader_config(path: &Path) -> anyhow::Result<UploaderConfig> {
    if !path.exists() {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            path = %path.display(),
            "No persisted configuration found, starting empty"
        );
        return Ok(UploaderConfig::default());
    }

    UploaderConfig::load(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}
