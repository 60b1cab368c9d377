//! Configuration loader for environment variables and explicit overrides.
//!
//! Responsibilities:
//! - Load configuration from `.env` files and environment variables.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical merging:
//!   explicit overrides take precedence over environment values.
//!
//! Does NOT handle:
//! - Persisting configuration back to disk.
//! - Token-kind validation (personal vs. API token); the client crate owns
//!   that because it depends on which endpoint is targeted.
//!
//! Invariants / Assumptions:
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is
//!   called so tests can opt out.

use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, ENV_EDGE_URL, ENV_ORG_ID,
    ENV_TOKEN, ENV_URL,
};
use crate::types::{AuthConfig, Config, ConnectionConfig};

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing API token: set {ENV_TOKEN} or provide one explicitly")]
    MissingToken,

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

/// Configuration loader that builds config from environment variables and
/// explicit overrides.
#[derive(Default)]
pub struct ConfigLoader {
    token: Option<SecretString>,
    org_id: Option<String>,
    base_url: Option<String>,
    edge_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// If the `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the `.env` file will not be loaded (useful for testing).
    pub fn load_dotenv(self) -> Self {
        if std::env::var("DOTENV_DISABLED").ok().as_deref() != Some("true")
            && std::env::var("DOTENV_DISABLED").ok().as_deref() != Some("1")
        {
            dotenvy::dotenv().ok();
        }
        self
    }

    /// Read an environment variable, returning None if unset, empty, or
    /// whitespace-only.
    pub fn env_var_or_none(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    /// Read configuration from environment variables.
    ///
    /// Values already set on the loader (explicit overrides) win over the
    /// environment.
    pub fn from_env(mut self) -> Self {
        if self.token.is_none()
            && let Some(token) = Self::env_var_or_none(ENV_TOKEN)
        {
            self.token = Some(SecretString::new(token.into()));
        }
        if self.org_id.is_none() {
            self.org_id = Self::env_var_or_none(ENV_ORG_ID);
        }
        if self.base_url.is_none() {
            self.base_url = Self::env_var_or_none(ENV_URL);
        }
        if self.edge_url.is_none() {
            self.edge_url = Self::env_var_or_none(ENV_EDGE_URL);
        }
        self
    }

    /// Set the API token.
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the organization id.
    pub fn with_org_id(mut self, org_id: String) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Set the API base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the edge URL used for ingest/query operations.
    pub fn with_edge_url(mut self, url: String) -> Self {
        self.edge_url = Some(url);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    fn validate_url(url: &str) -> Result<(), ConfigError> {
        Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let token = self.token.ok_or(ConfigError::MissingToken)?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self::validate_url(&base_url)?;

        let edge_url = self
            .edge_url
            .map(|url| url.trim_end_matches('/').to_string());
        if let Some(url) = &edge_url {
            Self::validate_url(url)?;
        }

        Ok(Config {
            connection: ConnectionConfig {
                base_url,
                org_id: self.org_id,
                edge_url,
                timeout: self.timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
                max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            },
            auth: AuthConfig { token },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_reads_all_variables() {
        temp_env::with_vars(
            [
                (ENV_TOKEN, Some("xaat-from-env")),
                (ENV_ORG_ID, Some("env-org")),
                (ENV_URL, Some("https://eu.axiom.co")),
                (ENV_EDGE_URL, Some("https://eu-central-1.aws.edge.axiom.co")),
            ],
            || {
                let config = ConfigLoader::new().from_env().build().unwrap();
                assert_eq!(config.auth.token.expose_secret(), "xaat-from-env");
                assert_eq!(config.connection.org_id, Some("env-org".to_string()));
                assert_eq!(config.connection.base_url, "https://eu.axiom.co");
                assert_eq!(
                    config.connection.edge_url,
                    Some("https://eu-central-1.aws.edge.axiom.co".to_string())
                );
            },
        );
    }

    #[test]
    #[serial]
    fn test_explicit_values_win_over_env() {
        temp_env::with_vars(
            [(ENV_TOKEN, Some("xaat-from-env")), (ENV_URL, Some("https://env.axiom.co"))],
            || {
                let config = ConfigLoader::new()
                    .with_token(SecretString::new("xaat-explicit".to_string().into()))
                    .with_base_url("https://explicit.axiom.co".to_string())
                    .from_env()
                    .build()
                    .unwrap();
                assert_eq!(config.auth.token.expose_secret(), "xaat-explicit");
                assert_eq!(config.connection.base_url, "https://explicit.axiom.co");
            },
        );
    }

    #[test]
    #[serial]
    fn test_missing_token_errors() {
        temp_env::with_vars([(ENV_TOKEN, None::<&str>)], || {
            let result = ConfigLoader::new().from_env().build();
            assert!(matches!(result, Err(ConfigError::MissingToken)));
        });
    }

    #[test]
    #[serial]
    fn test_empty_env_var_treated_as_unset() {
        temp_env::with_vars([(ENV_TOKEN, Some("  "))], || {
            let result = ConfigLoader::new().from_env().build();
            assert!(matches!(result, Err(ConfigError::MissingToken)));
        });
    }

    #[test]
    fn test_base_url_defaults_and_trailing_slash_trimmed() {
        let config = ConfigLoader::new()
            .with_token(SecretString::new("xaat-abc".to_string().into()))
            .build()
            .unwrap();
        assert_eq!(config.connection.base_url, DEFAULT_API_URL);

        let config = ConfigLoader::new()
            .with_token(SecretString::new("xaat-abc".to_string().into()))
            .with_base_url("https://api.axiom.co/".to_string())
            .build()
            .unwrap();
        assert_eq!(config.connection.base_url, "https://api.axiom.co");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = ConfigLoader::new()
            .with_token(SecretString::new("xaat-abc".to_string().into()))
            .with_base_url("not a url".to_string())
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_timeout_and_retries_overrides() {
        let config = ConfigLoader::new()
            .with_token(SecretString::new("xaat-abc".to_string().into()))
            .with_timeout(Duration::from_secs(120))
            .with_max_retries(5)
            .build()
            .unwrap();
        assert_eq!(config.connection.timeout, Duration::from_secs(120));
        assert_eq!(config.connection.max_retries, 5);
    }
}
