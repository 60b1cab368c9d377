//! Main Axiom REST API client and API methods.
//!
//! This module provides the primary [`Client`] for interacting with the
//! Axiom REST API. It attaches authentication headers, routes ingest and
//! query calls to an edge endpoint when one is configured, and owns the
//! shutdown hooks that flush log shippers before teardown.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `datasets`: Dataset management methods
//! - `annotations`: Annotation management methods
//! - `dashboards`: Dashboard management methods
//! - `tokens`: API token management methods
//! - `users`: User methods
//! - `ingest`: Event ingestion methods
//! - `query`: Legacy structured query and APL query methods
//!
//! # What this module does NOT handle:
//! - Retry and error normalization (delegated to [`crate::http`])
//! - Response decoding (delegated to [`crate::decode`])
//!
//! # Invariants
//! - Management calls always target the base URL; only ingest and APL query
//!   calls are routed to the edge URL when one is configured.
//! - An edge URL combined with a personal token fails before any request is
//!   sent.

pub mod builder;

pub use builder::ClientBuilder;

mod annotations;
mod dashboards;
mod datasets;
mod ingest;
mod query;
mod tokens;
mod users;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, Mutex};
use url::Url;

use crate::error::{Error, Result};
use crate::shipper::ShipperHandle;

/// Returns true if the given access token is a personal token.
pub fn is_personal_token(token: &str) -> bool {
    token.starts_with("xapt-")
}

/// Axiom REST API client.
///
/// # Creating a Client
///
/// Use [`Client::new`] to construct a client from the `AXIOM_TOKEN`,
/// `AXIOM_ORG_ID` and `AXIOM_URL` environment variables, or
/// [`Client::builder`] for explicit configuration:
///
/// ```rust,ignore
/// use axiom_client::Client;
/// use secrecy::SecretString;
///
/// let client = Client::builder()
///     .token(SecretString::new("xaat-my-token".to_string().into()))
///     .org_id("my-org".to_string())
///     .build()?;
/// ```
///
/// The client is cheap to clone; clones share the connection pool and the
/// registered shutdown hooks.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) edge_url: Option<String>,
    pub(crate) token: SecretString,
    pub(crate) org_id: Option<String>,
    pub(crate) max_retries: usize,
    pub(crate) shutdown_hooks: Arc<Mutex<Vec<ShipperHandle>>>,
}

impl Client {
    /// Create a client from the environment (`AXIOM_TOKEN`, `AXIOM_ORG_ID`,
    /// `AXIOM_URL`, `AXIOM_EDGE_URL`).
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> builder::ClientBuilder {
        builder::ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the organization id, if one is set.
    pub fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }

    /// Whether the configured credential is a personal token.
    pub fn uses_personal_token(&self) -> bool {
        is_personal_token(self.token.expose_secret())
    }

    /// Register a log shipper to be closed by [`Client::shutdown`].
    ///
    /// Buffered records are lost unless the shipper is flushed before the
    /// process exits, so owners of long-lived clients should call
    /// [`Client::shutdown`] during teardown.
    pub fn before_shutdown(&self, handle: ShipperHandle) {
        if let Ok(mut hooks) = self.shutdown_hooks.lock() {
            hooks.push(handle);
        }
    }

    /// Flush and stop every registered log shipper, in registration order.
    pub async fn shutdown(&self) {
        let hooks: Vec<ShipperHandle> = match self.shutdown_hooks.lock() {
            Ok(mut hooks) => hooks.drain(..).collect(),
            Err(_) => return,
        };
        for hook in hooks {
            hook.close().await;
        }
    }

    /// Start a request against a path on the base URL.
    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.request_url(method, &format!("{}{}", self.base_url, path))
    }

    /// Start a request against an absolute URL, attaching auth headers.
    pub(crate) fn request_url(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url).header(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", self.token.expose_secret()),
        );
        if let Some(org_id) = &self.org_id {
            builder = builder.header("X-Axiom-Org-Id", org_id);
        }
        builder
    }

    /// The edge ingest URL for a dataset, when an edge URL is configured.
    ///
    /// An edge URL without a path gets the standard ingest layout appended;
    /// one with a custom path is used as-is.
    pub(crate) fn edge_ingest_url(&self, dataset: &str) -> Option<String> {
        let edge_url = self.edge_url.as_deref()?;
        match Url::parse(edge_url) {
            Ok(parsed) if parsed.path() == "/" || parsed.path().is_empty() => {
                Some(format!("{edge_url}/v1/ingest/{dataset}"))
            }
            _ => Some(edge_url.to_string()),
        }
    }

    /// The edge query URL, when an edge URL is configured.
    pub(crate) fn edge_query_url(&self) -> Option<String> {
        let edge_url = self.edge_url.as_deref()?;
        match Url::parse(edge_url) {
            Ok(parsed) if parsed.path() == "/" || parsed.path().is_empty() => {
                Some(format!("{edge_url}/v1/query/_apl"))
            }
            _ => Some(edge_url.to_string()),
        }
    }

    /// Reject personal tokens before an edge request is made.
    pub(crate) fn check_edge_token(&self) -> Result<()> {
        if self.uses_personal_token() {
            return Err(Error::PersonalTokenNotSupported);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn test_client(edge_url: Option<&str>, token: &str) -> Client {
        use axiom_config::constants::{ENV_EDGE_URL, ENV_ORG_ID, ENV_TOKEN, ENV_URL};
        temp_env::with_vars(
            [
                (ENV_TOKEN, None::<&str>),
                (ENV_ORG_ID, None),
                (ENV_URL, None),
                (ENV_EDGE_URL, None),
            ],
            || {
                let mut builder = Client::builder()
                    .token(SecretString::new(token.to_string().into()))
                    .base_url("https://api.axiom.co".to_string());
                if let Some(url) = edge_url {
                    builder = builder.edge_url(url.to_string());
                }
                builder.build().unwrap()
            },
        )
    }

    #[test]
    fn test_is_personal_token() {
        assert!(is_personal_token("xapt-1234"));
        assert!(!is_personal_token("xaat-1234"));
        assert!(!is_personal_token(""));
    }

    #[test]
    #[serial]
    fn test_edge_urls_unset_without_edge_config() {
        let client = test_client(None, "xaat-abc");
        assert_eq!(client.edge_ingest_url("my-dataset"), None);
        assert_eq!(client.edge_query_url(), None);
    }

    #[test]
    #[serial]
    fn test_edge_urls_append_standard_layout() {
        let client = test_client(Some("https://eu-central-1.aws.edge.axiom.co"), "xaat-abc");
        assert_eq!(
            client.edge_ingest_url("my-dataset").as_deref(),
            Some("https://eu-central-1.aws.edge.axiom.co/v1/ingest/my-dataset")
        );
        assert_eq!(
            client.edge_query_url().as_deref(),
            Some("https://eu-central-1.aws.edge.axiom.co/v1/query/_apl")
        );
    }

    #[test]
    #[serial]
    fn test_edge_urls_with_custom_path_used_as_is() {
        let client = test_client(Some("https://edge.example.com/custom/ingest"), "xaat-abc");
        assert_eq!(
            client.edge_ingest_url("my-dataset").as_deref(),
            Some("https://edge.example.com/custom/ingest")
        );
    }

    #[test]
    #[serial]
    fn test_check_edge_token_rejects_personal_tokens() {
        let client = test_client(Some("https://edge.example.com"), "xapt-personal");
        assert!(matches!(
            client.check_edge_token(),
            Err(Error::PersonalTokenNotSupported)
        ));

        let client = test_client(Some("https://edge.example.com"), "xaat-api");
        assert!(client.check_edge_token().is_ok());
    }
}
