//! Uploader configuration.
//!
//! The configuration mapping ([`UploaderConfig`]) is owned and persisted by
//! the caller. Values are resolved with the following precedence:
//!
//! ```text
//! explicit config value > environment variable > prompt > error
//! ```
//!
//! [`UploaderConfig::configure`] fills the mapping in (prompting where a
//! [`Prompt`] is interactive) and [`UploaderConfig::resolve`] turns a
//! persisted mapping into an [`UploadTarget`] plus credentials path.

mod env;
mod prompt;
mod target;

use std::path::{Path, PathBuf};

pub use env::{ENV_BUCKET, ENV_BUCKET_KEY, ENV_CREDENTIALS, Environment, ProcessEnv};
use prompt::ask_or_default;
pub use prompt::{AcceptDefaults, Prompt};
use serde::{Deserialize, Serialize};
pub use target::UploadTarget;

use crate::TRACING_TARGET_CONFIG;
use crate::error::{ConfigError, Result};

const QUESTION_BUCKET_NAME: &str = "Please enter a bucket name";
const QUESTION_BUCKET_KEY: &str = "Please enter a bucket key";
const QUESTION_CREDENTIALS: &str = "Enter path to Google application credentials JSON file";

/// Persisted configuration mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploaderConfig {
    /// Bucket that receives uploads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    /// Key prefix inside the bucket; empty for the bucket root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_key: Option<String>,
    /// Path to the service-account credentials JSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcs_creds_path: Option<String>,
}

/// Configuration resolved for [`Uploader::initialize`](crate::Uploader::initialize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Bucket and key prefix.
    pub target: UploadTarget,
    /// Location of the credentials file.
    pub credentials_path: PathBuf,
}

impl UploaderConfig {
    /// Creates a configuration from explicit values.
    pub fn new(
        bucket_name: impl Into<String>,
        bucket_key: impl Into<String>,
        gcs_creds_path: impl Into<String>,
    ) -> Self {
        Self {
            bucket_name: Some(bucket_name.into()),
            bucket_key: Some(bucket_key.into()),
            gcs_creds_path: Some(gcs_creds_path.into()),
        }
    }

    /// Loads a persisted configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Persists the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut contents = serde_json::to_string_pretty(self)?;
        contents.push('\n');
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Fills in the configuration, asking `prompt` for each value.
    ///
    /// Each question offers the currently known value as its default; the
    /// credentials path defaults to `GOOGLE_APPLICATION_CREDENTIALS` when the
    /// mapping has none. Resolved values are written back into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBucketName`] if no bucket name was
    /// given, or an I/O error if prompting fails.
    pub fn configure<E, P>(&mut self, env: &E, prompt: &mut P) -> Result<()>
    where
        E: Environment + ?Sized,
        P: Prompt + ?Sized,
    {
        let bucket_name = ask_or_default(
            prompt,
            QUESTION_BUCKET_NAME,
            non_empty(self.bucket_name.clone()),
        )?
        .ok_or(ConfigError::MissingBucketName)?;

        let bucket_key = ask_or_default(prompt, QUESTION_BUCKET_KEY, self.bucket_key.clone())?
            .unwrap_or_default();

        let creds_default =
            non_empty(self.gcs_creds_path.clone()).or_else(|| env.var(ENV_CREDENTIALS));
        let gcs_creds_path = ask_or_default(prompt, QUESTION_CREDENTIALS, creds_default)?;

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            bucket_name = %bucket_name,
            bucket_key = %bucket_key,
            gcs_creds_path = ?gcs_creds_path,
            "Configuration updated"
        );

        self.bucket_name = Some(bucket_name);
        self.bucket_key = Some(bucket_key);
        self.gcs_creds_path = gcs_creds_path;

        Ok(())
    }

    /// Resolves the mapping against the environment.
    ///
    /// - `bucket_name` falls back to `PYU_GCS_BUCKET`.
    /// - `bucket_key` falls back to `PYU_GCS_BUCKET_KEY`, then the bucket root.
    /// - `gcs_creds_path` has no fallback.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBucketName`] or
    /// [`ConfigError::MissingCredentialsPath`].
    pub fn resolve<E>(&self, env: &E) -> Result<ResolvedConfig, ConfigError>
    where
        E: Environment + ?Sized,
    {
        let bucket_name = non_empty(self.bucket_name.clone())
            .or_else(|| env.var(ENV_BUCKET))
            .ok_or(ConfigError::MissingBucketName)?;

        // An explicit empty key in the mapping still means "bucket root".
        let bucket_key = self
            .bucket_key
            .clone()
            .or_else(|| env.var(ENV_BUCKET_KEY))
            .unwrap_or_default();

        let credentials_path = non_empty(self.gcs_creds_path.clone())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingCredentialsPath)?;

        Ok(ResolvedConfig {
            target: UploadTarget::new(bucket_name, bucket_key)?,
            credentials_path,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
