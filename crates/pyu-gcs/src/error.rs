//! Uploader error types.

/// Specialized [`Result`] type for uploader operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Configuration errors.
///
/// These are terminal: they are surfaced to the caller and never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Neither the config mapping nor `PYU_GCS_BUCKET` names a bucket.
    #[error("bucket name is not set")]
    MissingBucketName,

    /// The config mapping has no `gcs_creds_path`.
    #[error("credentials path is not set")]
    MissingCredentialsPath,

    /// The credentials bundle lacks one or more required fields.
    #[error("the following required upload parameters are missing: {}", .0.join(", "))]
    MissingCredentialFields(Vec<&'static str>),

    /// The uploader was used before it was initialized.
    #[error("uploader is not initialized")]
    NotInitialized,
}

/// Errors that can occur while configuring, connecting or uploading.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to create a client handle for the storage backend.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The destination key could not be derived or referenced.
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    /// I/O operation failed (reading credentials, config or the upload body).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error returned by the object store backend.
    #[error("object store error: {0}")]
    ObjectStore(#[from] object_store::Error),
}

impl Error {
    /// Creates a new connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a new invalid key error.
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// Returns whether this error indicates a configuration issue.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Returns the configuration error, if this is one.
    pub fn as_config_error(&self) -> Option<&ConfigError> {
        match self {
            Error::Config(err) => Some(err),
            _ => None,
        }
    }
}
