//! Storage backend seam.
//!
//! An upload goes through three observable stages, each of which may fail:
//!
//! 1. [`StorageClient::get_bucket`] looks the bucket up,
//! 2. [`StorageClient::blob`] references the destination object,
//! 3. [`StorageClient::upload_from_path`] transfers the local file.
//!
//! A [`Connector`] creates a fresh client handle from credentials. The
//! production pair is [`GcsConnector`] and [`ObjectStoreClient`].

use std::path::Path;

use object_store::path::Path as ObjectPath;

use crate::ServiceAccountCredentials;
use crate::error::Result;

mod gcs;
mod object_store_client;
mod put_output;

pub use gcs::GcsConnector;
pub use object_store_client::ObjectStoreClient;
pub use put_output::PutOutput;

/// Connected handle to a storage backend.
#[async_trait::async_trait]
pub trait StorageClient: Send + Sync {
    /// Looks up `bucket`, failing if it does not exist or cannot be reached.
    async fn get_bucket(&self, bucket: &str) -> Result<()>;

    /// References the object stored under `key`.
    fn blob(&self, key: &str) -> Result<ObjectPath>;

    /// Uploads the contents of `local_path` to `blob`, overwriting it.
    async fn upload_from_path(&self, blob: &ObjectPath, local_path: &Path) -> Result<PutOutput>;
}

/// Factory for [`StorageClient`] handles.
pub trait Connector: Send + Sync {
    /// The client type produced by [`connect`](Self::connect).
    type Client: StorageClient;

    /// Creates a new client for `bucket` authenticated with `credentials`.
    fn connect(&self, bucket: &str, credentials: &ServiceAccountCredentials)
    -> Result<Self::Client>;
}
