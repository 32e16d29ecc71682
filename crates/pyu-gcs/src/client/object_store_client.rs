//! [`StorageClient`] backed by [`object_store::ObjectStore`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutMode, PutOptions, PutPayload};

use super::{PutOutput, StorageClient};
use crate::TRACING_TARGET_CLIENT;
use crate::error::{Error, Result};

/// Probe key used for bucket lookups; it does not need to exist.
const BUCKET_PROBE_KEY: &str = "_pyu_gcs_bucket_probe";

/// Cloneable handle to an [`ObjectStore`] bound to a single bucket.
#[derive(Clone)]
pub struct ObjectStoreClient {
    bucket: String,
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreClient {
    /// Wraps a concrete [`ObjectStore`] serving `bucket`.
    pub fn new(bucket: impl Into<String>, store: impl ObjectStore) -> Self {
        Self::from_arc(bucket, Arc::new(store))
    }

    /// Wraps an already shared [`ObjectStore`] serving `bucket`.
    pub fn from_arc(bucket: impl Into<String>, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            bucket: bucket.into(),
            store,
        }
    }

    /// Returns the bucket this client is bound to.
    #[inline]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Returns the underlying store.
    #[inline]
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }
}

#[async_trait::async_trait]
impl StorageClient for ObjectStoreClient {
    /// Issues a HEAD for a probe key; a not-found response means the bucket
    /// exists, any other error is propagated.
    #[tracing::instrument(name = "object.get_bucket", target = TRACING_TARGET_CLIENT, skip(self))]
    async fn get_bucket(&self, bucket: &str) -> Result<()> {
        if bucket != self.bucket {
            return Err(Error::connection(format!(
                "client is bound to bucket '{}', not '{bucket}'",
                self.bucket
            )));
        }

        match self.store.head(&ObjectPath::from(BUCKET_PROBE_KEY)).await {
            Ok(_) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn blob(&self, key: &str) -> Result<ObjectPath> {
        let path = ObjectPath::parse(key).map_err(|e| Error::invalid_key(e.to_string()))?;
        if path.filename().is_none() {
            return Err(Error::invalid_key(format!("'{key}' does not name an object")));
        }
        Ok(path)
    }

    #[tracing::instrument(
        name = "object.upload",
        target = TRACING_TARGET_CLIENT,
        skip(self, blob),
        fields(key = %blob)
    )]
    async fn upload_from_path(&self, blob: &ObjectPath, local_path: &Path) -> Result<PutOutput> {
        let data = Bytes::from(tokio::fs::read(local_path).await?);
        let size = data.len() as u64;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            bucket = %self.bucket,
            size,
            "Uploading file"
        );

        let opts = PutOptions {
            mode: PutMode::Overwrite,
            ..Default::default()
        };
        let result = self
            .store
            .put_opts(blob, PutPayload::from(data), opts)
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            size,
            e_tag = ?result.e_tag,
            "Upload complete"
        );

        Ok(PutOutput::new(blob.to_string(), size, result))
    }
}

impl fmt::Debug for ObjectStoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStoreClient")
            .field("bucket", &self.bucket)
            .field("store", &self.store.to_string())
            .finish()
    }
}
