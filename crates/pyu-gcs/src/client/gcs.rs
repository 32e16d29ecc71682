//! Google Cloud Storage connector using [`object_store::gcp::GoogleCloudStorageBuilder`].

use object_store::gcp::GoogleCloudStorageBuilder;

use super::{Connector, ObjectStoreClient};
use crate::error::{Error, Result};
use crate::{ServiceAccountCredentials, TRACING_TARGET_CLIENT};

/// Creates [`ObjectStoreClient`]s for Google Cloud Storage buckets.
#[derive(Debug, Clone, Default)]
pub struct GcsConnector {
    endpoint: Option<String>,
}

impl GcsConnector {
    /// Creates a connector for the public GCS endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom endpoint URL (for testing with a fake GCS server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Returns the custom endpoint, if any.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

impl Connector for GcsConnector {
    type Client = ObjectStoreClient;

    fn connect(
        &self,
        bucket: &str,
        credentials: &ServiceAccountCredentials,
    ) -> Result<Self::Client> {
        let mut builder = GoogleCloudStorageBuilder::new()
            .with_bucket_name(bucket)
            .with_service_account_key(credentials.to_json()?);

        if let Some(endpoint) = &self.endpoint {
            builder = builder.with_url(endpoint);
        }

        let store = builder
            .build()
            .map_err(|e| Error::connection(e.to_string()))?;

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            bucket = %bucket,
            project_id = %credentials.project_id(),
            client_email = %credentials.client_email(),
            endpoint = ?self.endpoint,
            "GCS client created"
        );

        Ok(ObjectStoreClient::new(bucket, store))
    }
}
