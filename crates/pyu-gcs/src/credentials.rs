//! Google service-account credentials.
//!
//! The credentials file is parsed into a fixed allowlist of fields
//! ([`CredentialsFile`]) and then validated into an immutable
//! [`ServiceAccountCredentials`] bundle. Unknown keys in the file are ignored.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, Result};

/// Names of the required credential fields, in validation order.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "type",
    "project_id",
    "private_key_id",
    "private_key",
    "client_email",
    "client_id",
    "auth_uri",
    "token_uri",
    "auth_provider_x509_cert_url",
    "client_x509_cert_url",
];

/// Raw contents of a service-account credentials file.
///
/// Every field is optional here; completeness is checked by
/// [`CredentialsFile::validate`]. Numbers and booleans are read as their
/// JSON text, and any other non-string value counts as missing, so one
/// malformed field never hides the rest of the file.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CredentialsFile {
    /// Account type, `service_account` for key files.
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub private_key_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub private_key: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub client_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub client_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub auth_uri: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub token_uri: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub auth_provider_x509_cert_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub client_x509_cert_url: Option<String>,
}

impl CredentialsFile {
    /// Reads and parses the credentials file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Returns the names of absent fields, in [`REQUIRED_FIELDS`] order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .iter()
            .zip(self.slots())
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect()
    }

    /// Converts into a complete credentials bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentialFields`] naming every absent
    /// field when the bundle is incomplete.
    pub fn validate(self) -> Result<ServiceAccountCredentials, ConfigError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentialFields(missing));
        }

        match self {
            Self {
                kind: Some(kind),
                project_id: Some(project_id),
                private_key_id: Some(private_key_id),
                private_key: Some(private_key),
                client_email: Some(client_email),
                client_id: Some(client_id),
                auth_uri: Some(auth_uri),
                token_uri: Some(token_uri),
                auth_provider_x509_cert_url: Some(auth_provider_x509_cert_url),
                client_x509_cert_url: Some(client_x509_cert_url),
            } => Ok(ServiceAccountCredentials {
                kind,
                project_id,
                private_key_id,
                private_key,
                client_email,
                client_id,
                auth_uri,
                token_uri,
                auth_provider_x509_cert_url,
                client_x509_cert_url,
            }),
            other => Err(ConfigError::MissingCredentialFields(other.missing_fields())),
        }
    }

    fn slots(&self) -> [&Option<String>; 10] {
        [
            &self.kind,
            &self.project_id,
            &self.private_key_id,
            &self.private_key,
            &self.client_email,
            &self.client_id,
            &self.auth_uri,
            &self.token_uri,
            &self.auth_provider_x509_cert_url,
            &self.client_x509_cert_url,
        ]
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => Some(v.to_string()),
        _ => None,
    })
}

impl fmt::Debug for CredentialsFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsFile")
            .field("kind", &self.kind)
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("missing", &self.missing_fields())
            .finish_non_exhaustive()
    }
}

/// Complete, immutable service-account credentials.
///
/// The private key is never included in debug output.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ServiceAccountCredentials {
    #[serde(rename = "type")]
    kind: String,
    project_id: String,
    private_key_id: String,
    private_key: String,
    client_email: String,
    client_id: String,
    auth_uri: String,
    token_uri: String,
    auth_provider_x509_cert_url: String,
    client_x509_cert_url: String,
}

impl ServiceAccountCredentials {
    /// Returns the account type.
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the project id.
    #[inline]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Returns the service-account email.
    #[inline]
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Returns the private key (PEM).
    #[inline]
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Returns the token endpoint.
    #[inline]
    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    /// Returns a masked version of the private key id for logging.
    ///
    /// This shows only the first 4 characters followed by asterisks.
    pub fn private_key_id_masked(&self) -> String {
        match self.private_key_id.get(..4) {
            Some(prefix) if self.private_key_id.len() > 4 => format!("{prefix}***"),
            _ => "*".repeat(self.private_key_id.chars().count()),
        }
    }

    /// Serializes the bundle back into service-account key JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("kind", &self.kind)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id_masked())
            .field("client_email", &self.client_email)
            .finish_non_exhaustive()
    }
}
