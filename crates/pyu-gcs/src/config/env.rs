//! Environment variable lookup.

use std::collections::HashMap;

/// Fallback bucket name.
pub const ENV_BUCKET: &str = "PYU_GCS_BUCKET";
/// Fallback bucket key (path prefix inside the bucket).
pub const ENV_BUCKET_KEY: &str = "PYU_GCS_BUCKET_KEY";
/// Standard Google application credentials path.
pub const ENV_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Read access to environment variables.
///
/// Empty values are reported as unset.
pub trait Environment {
    /// Returns the value of `key`, if set and non-empty.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}
