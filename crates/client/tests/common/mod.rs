//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the Axiom client. All integration tests should use
//! these utilities to ensure consistency.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the
//!   crate root
//! - `test_client` strips the Axiom environment variables once per process
//!   so a developer's local configuration cannot leak into the mocks
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

use secrecy::SecretString;
use std::sync::Once;
use std::time::Duration;

// Re-export test utilities from axiom-client
#[allow(unused_imports)]
pub use axiom_client::testing::load_fixture;

// Re-export commonly used types for test convenience
// These are used via `use common::*;` in test files
#[allow(unused_imports)]
pub use axiom_client::{Client, Error};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

static CLEAR_ENV: Once = Once::new();

fn clear_axiom_env() {
    CLEAR_ENV.call_once(|| {
        for var in ["AXIOM_TOKEN", "AXIOM_ORG_ID", "AXIOM_URL", "AXIOM_EDGE_URL"] {
            // Safety: runs once, before the tests below have spawned any
            // thread that reads the environment.
            unsafe { std::env::remove_var(var) };
        }
    });
}

/// Build a client against a mock server, with retries disabled so error
/// tests do not sleep through backoff.
#[allow(dead_code)]
pub fn test_client(base_url: &str) -> Client {
    clear_axiom_env();
    Client::builder()
        .token(SecretString::new("xaat-test-token".to_string().into()))
        .base_url(base_url.to_string())
        .max_retries(0)
        .build()
        .expect("client against mock server")
}

/// Build a client with an edge URL configured.
#[allow(dead_code)]
pub fn test_edge_client(base_url: &str, edge_url: &str, token: &str) -> Client {
    clear_axiom_env();
    Client::builder()
        .token(SecretString::new(token.to_string().into()))
        .base_url(base_url.to_string())
        .edge_url(edge_url.to_string())
        .max_retries(0)
        .build()
        .expect("edge client against mock server")
}

/// Build a client with the default retry policy (3 attempts).
#[allow(dead_code)]
pub fn test_client_with_retries(base_url: &str) -> Client {
    clear_axiom_env();
    Client::builder()
        .token(SecretString::new("xaat-test-token".to_string().into()))
        .base_url(base_url.to_string())
        .build()
        .expect("client against mock server")
}

/// Advance Tokio's paused clock and yield so sleepers can observe the change.
#[allow(dead_code)]
pub async fn advance_and_yield(duration: Duration) {
    tokio::time::advance(duration).await;
    tokio::task::yield_now().await;
}

/// Yield to the scheduler a few times so spawned tasks can run.
#[allow(dead_code)]
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

/// In-memory [`axiom_client::EventSink`] recording every shipped batch.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct MockSink {
    batches: std::sync::Arc<std::sync::Mutex<Vec<Vec<serde_json::Value>>>>,
    calls: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    fail: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

#[allow(dead_code)]
impl MockSink {
    pub fn batches(&self) -> Vec<Vec<serde_json::Value>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, std::sync::atomic::Ordering::SeqCst);
    }
}

impl axiom_client::EventSink for MockSink {
    fn ingest_events<'a>(
        &'a self,
        _dataset: &'a str,
        events: &'a [serde_json::Value],
    ) -> impl std::future::Future<Output = axiom_client::Result<axiom_client::models::ingest::IngestStatus>>
    + Send
    + 'a {
        use std::sync::atomic::Ordering;
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(axiom_client::Error::Api {
                    status: 503,
                    message: "service unavailable".to_string(),
                });
            }
            self.batches.lock().unwrap().push(events.to_vec());
            Ok(axiom_client::models::ingest::IngestStatus {
                ingested: events.len() as u64,
                failed: 0,
                failures: vec![],
                processed_bytes: 0,
                blocks_created: 0,
                wal_length: 0,
            })
        }
    }
}
