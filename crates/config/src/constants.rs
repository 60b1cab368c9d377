//! Centralized constants for the Axiom client workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default Axiom API base URL.
pub const DEFAULT_API_URL: &str = "https://api.axiom.co";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum number of retries for requests that fail with a
/// retryable status code.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Exponential backoff factor between retries (delay = factor^attempt seconds).
pub const RETRY_BACKOFF_FACTOR: u64 = 2;

/// HTTP status codes that are retried with backoff.
pub const RETRY_STATUS_CODES: [u16; 4] = [500, 502, 503, 504];

// =============================================================================
// Ingest Shipping Defaults
// =============================================================================

/// Number of buffered events that triggers a size-based flush.
pub const MAX_BATCH_EVENTS: usize = 1000;

/// Default interval between time-based flushes in seconds.
pub const DEFAULT_FLUSH_INTERVAL_SECS: u64 = 1;

/// Upper bound on events held across failed-flush requeues. Beyond this,
/// the oldest events are dropped so a dead sink cannot grow memory forever.
pub const MAX_REQUEUE_EVENTS: usize = 8 * MAX_BATCH_EVENTS;

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable holding the API token.
pub const ENV_TOKEN: &str = "AXIOM_TOKEN";

/// Environment variable holding the organization id.
pub const ENV_ORG_ID: &str = "AXIOM_ORG_ID";

/// Environment variable overriding the API base URL.
pub const ENV_URL: &str = "AXIOM_URL";

/// Environment variable holding an edge ingest/query URL.
pub const ENV_EDGE_URL: &str = "AXIOM_EDGE_URL";
