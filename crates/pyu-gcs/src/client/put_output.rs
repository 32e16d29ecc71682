//! Result type for [`StorageClient::upload_from_path`](super::StorageClient::upload_from_path).

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOutput {
    /// Object key the file was written to.
    pub key: String,
    /// Number of bytes transferred.
    pub size: u64,
    /// Unique identifier for the newly created object, if the backend provides one.
    pub e_tag: Option<String>,
    /// A version indicator for the newly created object, if the backend provides one.
    pub version: Option<String>,
}

impl PutOutput {
    pub(crate) fn new(key: impl Into<String>, size: u64, result: object_store::PutResult) -> Self {
        Self {
            key: key.into(),
            size,
            e_tag: result.e_tag,
            version: result.version,
        }
    }
}
