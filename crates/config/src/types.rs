//! Configuration types for the Axiom client.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{DEFAULT_API_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Authentication configuration.
///
/// Axiom uses bearer-token authentication exclusively. Personal tokens carry
/// an `xapt-` prefix and are rejected by edge endpoints; that validation
/// lives in the client crate where the edge URL is resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// API or personal token used as the bearer credential.
    #[serde(with = "secret_string")]
    pub token: SecretString,
}

/// Connection configuration for the Axiom API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the API (e.g. https://api.axiom.co).
    pub base_url: String,
    /// Organization id, sent as the `X-Axiom-Org-Id` header when set.
    pub org_id: Option<String>,
    /// Edge URL for ingest/query operations. Management calls always go to
    /// `base_url`.
    pub edge_url: Option<String>,
    /// Request timeout (serialized as seconds).
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for requests failing with a retryable status.
    pub max_retries: usize,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings.
    pub connection: ConnectionConfig,
    /// Authentication settings.
    pub auth: AuthConfig,
}

impl Config {
    /// Create a configuration with the given token and defaults everywhere else.
    pub fn with_token(token: SecretString) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url: DEFAULT_API_URL.to_string(),
                org_id: None,
                edge_url: None,
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                max_retries: DEFAULT_MAX_RETRIES,
            },
            auth: AuthConfig { token },
        }
    }
}
