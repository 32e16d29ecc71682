//! Convenience re-exports.

pub use crate::client::{Connector, GcsConnector, ObjectStoreClient, PutOutput, StorageClient};
pub use crate::config::{
    AcceptDefaults, Environment, ProcessEnv, Prompt, UploadTarget, UploaderConfig,
};
pub use crate::credentials::{CredentialsFile, ServiceAccountCredentials};
pub use crate::error::{ConfigError, Error, Result};
pub use crate::uploader::{UploadPlugin, Uploader, UploaderState};
