#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CONFIG: &str = "pyu_gcs::config";
pub const TRACING_TARGET_CLIENT: &str = "pyu_gcs::client";
pub const TRACING_TARGET_UPLOADER: &str = "pyu_gcs::uploader";

/// Storage client seam and the object-store backed GCS client.
pub mod client;
/// Configuration resolution (config mapping, environment, prompts).
pub mod config;
mod credentials;
mod error;
mod uploader;

#[doc(hidden)]
pub mod prelude;

pub use crate::credentials::{CredentialsFile, REQUIRED_FIELDS, ServiceAccountCredentials};
pub use crate::error::{ConfigError, Error, Result};
pub use crate::uploader::{UploadPlugin, Uploader, UploaderState};
