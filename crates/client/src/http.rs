//! Retry and response-normalization helpers for HTTP requests.
//!
//! This module wraps a `reqwest::RequestBuilder` with retry logic that:
//! - Retries HTTP 500, 502, 503 and 504 responses with exponential backoff
//!   (1s, 2s, 4s = factor^attempt).
//! - Normalizes every other non-2xx response into [`Error::Api`], preferring
//!   the `error` field of an Axiom-format error body over `message`, and
//!   falling back to the HTTP status line when the body is not parseable.

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use axiom_config::constants::RETRY_BACKOFF_FACTOR;

use crate::error::{Error, ErrorResponse, Result};

/// Send an HTTP request, retrying retryable status codes with exponential
/// backoff.
///
/// Returns the successful response, or [`Error::Api`] for a non-2xx response
/// once retries are exhausted. Transport-level failures are not retried; the
/// request may already have reached the server.
pub(crate) async fn send_with_retry(builder: RequestBuilder, max_retries: usize) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                // Streaming bodies cannot be cloned; single attempt only.
                if attempt == 0 {
                    debug!("Request builder cannot be cloned, single attempt only");
                    let response = builder.send().await?;
                    return check_response(response).await;
                }
                break;
            }
        };

        let response = attempt_builder.send().await?;
        let status = response.status().as_u16();

        if Error::is_retryable_status(status) && attempt < max_retries {
            let backoff_secs = RETRY_BACKOFF_FACTOR.pow(attempt as u32);
            debug!(
                attempt = attempt + 1,
                max_retries = max_retries + 1,
                status = status,
                backoff_secs = backoff_secs,
                "Retryable status, retrying with exponential backoff"
            );
            tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
            continue;
        }

        if attempt > 0 && response.status().is_success() {
            debug!(attempt = attempt + 1, "Request succeeded after retry");
        }
        return check_response(response).await;
    }

    // Only reachable when a retry was needed but the builder stopped being
    // clonable, which try_clone rules out after the first pass.
    Err(Error::MaxRetriesExceeded(max_retries + 1))
}

/// Normalize a non-2xx response into [`Error::Api`]; pass 2xx through.
async fn check_response(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let reason = response
        .status()
        .canonical_reason()
        .unwrap_or("unknown error");
    let fallback = format!("HTTP {status} {reason}");

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(ErrorResponse::into_message)
        .unwrap_or(fallback);

    Err(Error::Api { status, message })
}

/// Read a response body as JSON.
pub(crate) async fn json_body(response: Response) -> Result<serde_json::Value> {
    response.json().await.map_err(Error::from)
}
