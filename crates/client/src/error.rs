//! Error types for the Axiom client.

use serde::Deserialize;
use thiserror::Error;

use axiom_config::constants::RETRY_STATUS_CODES;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during Axiom client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API error response from Axiom.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Malformed or type-mismatched response body.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A request body could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(String),

    /// A legacy query was submitted without a saveable query kind.
    #[error("invalid query kind {0}: must be analytics or stream")]
    WrongQueryKind(String),

    /// An edge endpoint was targeted with a personal token.
    #[error("personal tokens are not supported for edge endpoints, use an API token")]
    PersonalTokenNotSupported,

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// A duration literal could not be parsed.
    #[error("invalid duration literal: {0}")]
    InvalidDurationLiteral(String),

    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] axiom_config::ConfigError),
}

impl Error {
    /// Check if an HTTP status code is retried with backoff.
    ///
    /// Retryable status codes are 500, 502, 503 and 504; client errors (4xx)
    /// fail immediately.
    pub fn is_retryable_status(status: u16) -> bool {
        RETRY_STATUS_CODES.contains(&status)
    }

    /// Check if this error is an API error with the given status.
    pub fn is_status(&self, wanted: u16) -> bool {
        matches!(self, Self::Api { status, .. } if *status == wanted)
    }
}

/// The error body returned by the Axiom API.
///
/// Responses carry a `message` and/or an `error` string; `error` is the more
/// specific of the two when both are present.
#[derive(Debug, Deserialize, Default)]
pub struct ErrorResponse {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorResponse {
    /// The most specific message available, preferring `error` over `message`.
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}
