//! Client builder for constructing [`Client`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Falling back to the environment (`AXIOM_TOKEN`, `AXIOM_ORG_ID`,
//!   `AXIOM_URL`, `AXIOM_EDGE_URL`) for anything not set explicitly
//! - Normalizing and validating URLs
//! - Configuring the underlying HTTP client (timeout, user agent)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`Client`] methods)
//! - Retry logic for failed requests (handled by [`crate::http`])
//!
//! # Invariants
//! - A token is required; everything else has a default.
//! - URLs are normalized to have no trailing slashes.

use secrecy::SecretString;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axiom_config::{Config, ConfigLoader};

use crate::client::Client;
use crate::error::Result;

/// Builder for creating a new [`Client`].
///
/// All configuration options fall back to the environment and then to
/// defaults; only the token has no default.
pub struct ClientBuilder {
    token: Option<SecretString>,
    org_id: Option<String>,
    base_url: Option<String>,
    edge_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            token: None,
            org_id: None,
            base_url: None,
            edge_url: None,
            timeout: None,
            max_retries: None,
        }
    }

    /// Set the API token.
    pub fn token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the organization id, sent as the `X-Axiom-Org-Id` header.
    pub fn org_id(mut self, org_id: String) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Set the API base URL. Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set an edge URL for ingest and query operations.
    ///
    /// Edge endpoints require API tokens (`xaat-`); a personal token
    /// (`xapt-`) fails at the first edge-routed call.
    pub fn edge_url(mut self, url: String) -> Self {
        self.edge_url = Some(url);
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries for retryable status codes.
    /// Default is 3 with exponential backoff (1s, 2s, 4s delays).
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Pre-configure the builder from a loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.token = Some(config.auth.token.clone());
        self.org_id = config.connection.org_id.clone();
        self.base_url = Some(config.connection.base_url.clone());
        self.edge_url = config.connection.edge_url.clone();
        self.timeout = Some(config.connection.timeout);
        self.max_retries = Some(config.connection.max_retries);
        self
    }

    /// Build the [`Client`], filling unset options from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] when no token is available or a URL
    /// is invalid, and [`crate::Error::Http`] when the HTTP client fails to
    /// build.
    pub fn build(self) -> Result<Client> {
        let mut loader = ConfigLoader::new();
        if let Some(token) = self.token {
            loader = loader.with_token(token);
        }
        if let Some(org_id) = self.org_id {
            loader = loader.with_org_id(org_id);
        }
        if let Some(base_url) = self.base_url {
            loader = loader.with_base_url(base_url);
        }
        if let Some(edge_url) = self.edge_url {
            loader = loader.with_edge_url(edge_url);
        }
        if let Some(timeout) = self.timeout {
            loader = loader.with_timeout(timeout);
        }
        if let Some(max_retries) = self.max_retries {
            loader = loader.with_max_retries(max_retries);
        }
        let config = loader.from_env().build()?;

        let http = reqwest::Client::builder()
            .timeout(config.connection.timeout)
            .user_agent(concat!("axiom-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Client {
            http,
            base_url: config.connection.base_url,
            edge_url: config.connection.edge_url,
            token: config.auth.token,
            org_id: config.connection.org_id,
            max_retries: config.connection.max_retries,
            shutdown_hooks: Arc::new(Mutex::new(Vec::new())),
        })
    }
}
