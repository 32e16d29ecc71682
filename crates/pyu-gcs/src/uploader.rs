//! Credentialed single-file uploader.
//!
//! [`Uploader`] resolves configuration, holds exactly one client handle and
//! uploads one file per call. A failed upload is logged, the client handle is
//! replaced by a fresh connection, and `false` is returned; the caller owns
//! any further retries.
//!
//! ```text
//! Unconfigured -> Configured -> Connected <-> (upload attempt)
//! ```

use std::path::Path;

use crate::TRACING_TARGET_UPLOADER;
use crate::client::{Connector, GcsConnector, PutOutput, StorageClient};
use crate::config::{Environment, Prompt, UploadTarget, UploaderConfig};
use crate::credentials::{CredentialsFile, ServiceAccountCredentials};
use crate::error::{ConfigError, Result};

/// Lifecycle of an [`Uploader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploaderState {
    /// [`Uploader::initialize`] has not succeeded yet.
    Unconfigured,
    /// Target and credentials are known but no client handle is held.
    Configured,
    /// A client handle is held.
    Connected,
}

/// Upload contract expected by a release orchestrator.
///
/// The orchestrator owns and persists the configuration mapping and decides
/// when uploads happen.
#[async_trait::async_trait]
pub trait UploadPlugin: Send {
    /// Plugin identifier.
    const NAME: &'static str;
    /// Plugin author.
    const AUTHOR: &'static str;

    /// Fills in the configuration mapping, prompting for missing values.
    fn configure(
        &self,
        config: &mut UploaderConfig,
        env: &dyn Environment,
        prompt: &mut dyn Prompt,
    ) -> Result<()>;

    /// Prepares the plugin for uploads from a configured mapping.
    fn initialize(&mut self, config: &UploaderConfig, env: &dyn Environment) -> Result<()>;

    /// Uploads one file; returns whether it succeeded.
    async fn upload_file(&mut self, local_path: &Path) -> bool;
}

/// Uploads release artifacts to a bucket.
pub struct Uploader<C: Connector = GcsConnector> {
    connector: C,
    target: Option<UploadTarget>,
    credentials: Option<ServiceAccountCredentials>,
    client: Option<C::Client>,
    generation: u64,
}

impl Uploader {
    /// Creates an uploader for Google Cloud Storage.
    pub fn new() -> Self {
        Self::with_connector(GcsConnector::new())
    }
}

impl Default for Uploader {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> Uploader<C> {
    /// Creates an uploader that connects through `connector`.
    pub fn with_connector(connector: C) -> Self {
        Self {
            connector,
            target: None,
            credentials: None,
            client: None,
            generation: 0,
        }
    }

    /// Returns the connector.
    #[inline]
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Returns the resolved upload target, once initialized.
    #[inline]
    pub fn target(&self) -> Option<&UploadTarget> {
        self.target.as_ref()
    }

    /// Returns the current client handle, if connected.
    #[inline]
    pub fn client(&self) -> Option<&C::Client> {
        self.client.as_ref()
    }

    /// Number of client handles created so far.
    ///
    /// Changes every time [`connect`](Self::connect) replaces the handle.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> UploaderState {
        match (&self.credentials, &self.client) {
            (None, _) => UploaderState::Unconfigured,
            (Some(_), None) => UploaderState::Configured,
            (Some(_), Some(_)) => UploaderState::Connected,
        }
    }

    /// Fills in `config`, asking `prompt` for each value.
    ///
    /// See [`UploaderConfig::configure`].
    pub fn configure<E, P>(&self, config: &mut UploaderConfig, env: &E, prompt: &mut P) -> Result<()>
    where
        E: Environment + ?Sized,
        P: Prompt + ?Sized,
    {
        config.configure(env, prompt)
    }

    /// Resolves `config`, loads and validates the credentials, and connects.
    ///
    /// A credentials file that cannot be read or parsed is logged and
    /// treated as empty, so the error reported is the list of missing fields.
    /// Any previous target, credentials and client handle are discarded
    /// first, so a failed call leaves the uploader unconfigured.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the bucket name, the credentials path or
    /// any credential field is missing, or the connector's error if the
    /// client handle cannot be created.
    pub fn initialize<E>(&mut self, config: &UploaderConfig, env: &E) -> Result<()>
    where
        E: Environment + ?Sized,
    {
        self.target = None;
        self.credentials = None;
        self.client = None;

        let resolved = config.resolve(env)?;

        let file = match CredentialsFile::load(&resolved.credentials_path) {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_UPLOADER,
                    path = %resolved.credentials_path.display(),
                    error = %err,
                    "Unable to load credentials file, ignoring"
                );
                CredentialsFile::default()
            }
        };

        let credentials = file.validate()?;

        tracing::info!(
            target: TRACING_TARGET_UPLOADER,
            bucket = %resolved.target.bucket_name(),
            bucket_key = %resolved.target.bucket_key(),
            private_key_id = %credentials.private_key_id_masked(),
            "Uploader configured"
        );

        self.target = Some(resolved.target);
        self.credentials = Some(credentials);

        self.connect()
    }

    /// Creates a new client handle, replacing the current one.
    ///
    /// The previous handle is dropped before connecting, so on failure the
    /// uploader holds no handle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotInitialized`] before a successful
    /// [`initialize`](Self::initialize), or the connector's error.
    pub fn connect(&mut self) -> Result<()> {
        let (Some(target), Some(credentials)) = (&self.target, &self.credentials) else {
            return Err(ConfigError::NotInitialized.into());
        };

        self.client = None;
        let client = self.connector.connect(target.bucket_name(), credentials)?;

        self.client = Some(client);
        self.generation += 1;

        tracing::debug!(
            target: TRACING_TARGET_UPLOADER,
            bucket = %target.bucket_name(),
            generation = self.generation,
            "Connected to storage backend"
        );

        Ok(())
    }

    /// Uploads the file at `local_path`; returns whether it succeeded.
    ///
    /// The object key is the file's base name, under the configured key
    /// prefix. On failure the error is logged and the client handle is
    /// replaced once; errors never reach the caller. When no handle is held
    /// (a previous reconnect failed) one is created before the attempt.
    pub async fn upload_file(&mut self, local_path: impl AsRef<Path>) -> bool {
        let local_path = local_path.as_ref();

        if self.credentials.is_none() {
            tracing::error!(
                target: TRACING_TARGET_UPLOADER,
                path = %local_path.display(),
                "Failed to upload file: uploader is not initialized"
            );
            return false;
        }

        if self.client.is_none()
            && let Err(err) = self.connect()
        {
            tracing::error!(
                target: TRACING_TARGET_UPLOADER,
                path = %local_path.display(),
                error = %err,
                "Failed to upload file: unable to connect"
            );
            return false;
        }

        match self.try_upload(local_path).await {
            Ok(output) => {
                tracing::info!(
                    target: TRACING_TARGET_UPLOADER,
                    path = %local_path.display(),
                    key = %output.key,
                    size = output.size,
                    "File uploaded"
                );
                true
            }
            Err(err) => {
                tracing::error!(
                    target: TRACING_TARGET_UPLOADER,
                    path = %local_path.display(),
                    error = %err,
                    "Failed to upload file"
                );
                tracing::debug!(
                    target: TRACING_TARGET_UPLOADER,
                    error = ?err,
                    "Upload failure details"
                );

                if let Err(err) = self.connect() {
                    tracing::error!(
                        target: TRACING_TARGET_UPLOADER,
                        error = %err,
                        "Failed to reconnect after upload failure"
                    );
                }

                false
            }
        }
    }

    async fn try_upload(&self, local_path: &Path) -> Result<PutOutput> {
        let (Some(target), Some(client)) = (&self.target, &self.client) else {
            return Err(ConfigError::NotInitialized.into());
        };

        let key = target.destination_key(local_path).ok_or_else(|| {
            crate::Error::invalid_key(format!("'{}' has no file name", local_path.display()))
        })?;

        client.get_bucket(target.bucket_name()).await?;
        let blob = client.blob(&key)?;
        client.upload_from_path(&blob, local_path).await
    }
}

#[async_trait::async_trait]
impl<C: Connector> UploadPlugin for Uploader<C> {
    const NAME: &'static str = "gcs";
    const AUTHOR: &'static str = "Tartan Solutions";

    fn configure(
        &self,
        config: &mut UploaderConfig,
        env: &dyn Environment,
        prompt: &mut dyn Prompt,
    ) -> Result<()> {
        Uploader::configure(self, config, env, prompt)
    }

    fn initialize(&mut self, config: &UploaderConfig, env: &dyn Environment) -> Result<()> {
        Uploader::initialize(self, config, env)
    }

    async fn upload_file(&mut self, local_path: &Path) -> bool {
        Uploader::upload_file(self, local_path).await
    }
}

impl<C: Connector + std::fmt::Debug> std::fmt::Debug for Uploader<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Uploader")
            .field("connector", &self.connector)
            .field("target", &self.target)
            .field("state", &self.state())
            .field("generation", &self.generation)
            .finish()
    }
}
