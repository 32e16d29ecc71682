//! Bucket and key prefix that uploads are written to.

use std::path::Path;

use crate::error::ConfigError;

/// Destination of uploaded files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    bucket_name: String,
    bucket_key: String,
}

impl UploadTarget {
    /// Creates a new target.
    ///
    /// An empty `bucket_key` means the bucket root. Leading and trailing
    /// `/` are stripped from `bucket_key`, so `"v2/"` and `"/v2"` both
    /// name the `v2` prefix and `"/"` names the bucket root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBucketName`] if `bucket_name` is empty.
    pub fn new(
        bucket_name: impl Into<String>,
        bucket_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let bucket_name = bucket_name.into();
        if bucket_name.is_empty() {
            return Err(ConfigError::MissingBucketName);
        }

        Ok(Self {
            bucket_name,
            bucket_key: bucket_key.into().trim_matches('/').to_owned(),
        })
    }

    /// Returns the bucket name.
    #[inline]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Returns the key prefix; empty for the bucket root.
    #[inline]
    pub fn bucket_key(&self) -> &str {
        &self.bucket_key
    }

    /// Computes the object key for `local_path`.
    ///
    /// The key is the file's base name, prefixed with `bucket_key/` when a
    /// key prefix is set. Returns `None` if the path has no file name.
    pub fn destination_key(&self, local_path: impl AsRef<Path>) -> Option<String> {
        let file_name = local_path.as_ref().file_name()?.to_string_lossy();

        if self.bucket_key.is_empty() {
            Some(file_name.into_owned())
        } else {
            Some(format!("{}/{}", self.bucket_key, file_name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_with_prefix() {
        let target = UploadTarget::new("releases", "v2").unwrap();
        assert_eq!(
            target.destination_key("/tmp/app-1.2.0.zip").as_deref(),
            Some("v2/app-1.2.0.zip")
        );
    }

    #[test]
    fn key_at_bucket_root() {
        let target = UploadTarget::new("releases", "").unwrap();
        assert_eq!(
            target.destination_key("/tmp/app-1.2.0.zip").as_deref(),
            Some("app-1.2.0.zip")
        );
    }

    #[test]
    fn nested_prefix_is_kept_verbatim() {
        let target = UploadTarget::new("releases", "stable/win").unwrap();
        assert_eq!(
            target.destination_key("build/deploy/app.exe").as_deref(),
            Some("stable/win/app.exe")
        );
        assert_eq!(
            target.destination_key("app.exe").as_deref(),
            Some("stable/win/app.exe")
        );
    }

    #[test]
    fn surrounding_slashes_in_prefix_are_stripped() {
        for key in ["v2/", "/v2", "/v2/"] {
            let target = UploadTarget::new("releases", key).unwrap();
            assert_eq!(target.bucket_key(), "v2", "{key:?}");
            assert_eq!(
                target.destination_key("/tmp/app-1.2.0.zip").as_deref(),
                Some("v2/app-1.2.0.zip"),
                "{key:?}"
            );
        }

        let target = UploadTarget::new("releases", "/stable/win/").unwrap();
        assert_eq!(target.bucket_key(), "stable/win");
    }

    #[test]
    fn slash_only_prefix_is_bucket_root() {
        let target = UploadTarget::new("releases", "/").unwrap();
        assert_eq!(target.bucket_key(), "");
        assert_eq!(
            target.destination_key("/tmp/app-1.2.0.zip").as_deref(),
            Some("app-1.2.0.zip")
        );
    }

    #[test]
    fn path_without_file_name() {
        let target = UploadTarget::new("releases", "v2").unwrap();
        assert_eq!(target.destination_key("/"), None);
        assert_eq!(target.destination_key("build/.."), None);
    }

    #[test]
    fn empty_bucket_name_is_rejected() {
        assert_eq!(
            UploadTarget::new("", "v2").unwrap_err(),
            ConfigError::MissingBucketName
        );
    }
}
