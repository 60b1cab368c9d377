//! Event ingestion methods for [`Client`].
//!
//! # What this module handles:
//! - Raw payload ingestion with explicit content type and encoding
//! - Typed event ingestion as gzip-compressed NDJSON
//! - Routing to the edge ingest endpoint when one is configured
//!
//! # What this module does NOT handle:
//! - Buffering and periodic flushing (see [`crate::shipper`])
//!
//! # Invariants
//! - `ingest_events` always ships NDJSON + gzip; callers with pre-encoded
//!   payloads use `ingest` directly.

use flate2::Compression;
use flate2::write::GzEncoder;
use reqwest::Method;
use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE};
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::client::Client;
use crate::decode::decode;
use crate::error::{Error, Result};
use crate::http::{json_body, send_with_retry};
use crate::models::{ContentEncoding, ContentType, IngestOptions, IngestStatus};

/// Encode events as newline-delimited JSON and gzip-compress the result.
fn ndjson_gzip<E: Serialize>(events: &[E]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    for event in events {
        serde_json::to_writer(&mut encoder, event)
            .map_err(|e| Error::Encode(e.to_string()))?;
        encoder
            .write_all(b"\n")
            .map_err(|e| Error::Encode(e.to_string()))?;
    }
    encoder.finish().map_err(|e| Error::Encode(e.to_string()))
}

impl Client {
    /// Ingest a raw payload into the named dataset and return the status.
    ///
    /// Routed to the edge ingest endpoint when one is configured; edge
    /// endpoints reject personal tokens before any request is sent.
    pub async fn ingest(
        &self,
        dataset: &str,
        payload: Vec<u8>,
        content_type: ContentType,
        content_encoding: ContentEncoding,
        opts: Option<&IngestOptions>,
    ) -> Result<IngestStatus> {
        let builder = match self.edge_ingest_url(dataset) {
            Some(url) => {
                self.check_edge_token()?;
                self.request_url(Method::POST, &url)
            }
            None => self.request(Method::POST, &format!("/v1/datasets/{dataset}/ingest")),
        };

        let params = opts.map(IngestOptions::query_params).unwrap_or_default();
        let builder = builder
            .header(CONTENT_TYPE, content_type.as_str())
            .header(CONTENT_ENCODING, content_encoding.as_str())
            .query(&params)
            .body(payload);

        let response = send_with_retry(builder, self.max_retries).await?;
        let status: IngestStatus = decode(&json_body(response).await?)?;
        debug!(
            dataset = dataset,
            ingested = status.ingested,
            failed = status.failed,
            "ingested payload"
        );
        Ok(status)
    }

    /// Ingest typed events into the named dataset and return the status.
    ///
    /// Events are encoded as newline-delimited JSON and gzip-compressed
    /// before shipping.
    pub async fn ingest_events<E: Serialize>(
        &self,
        dataset: &str,
        events: &[E],
        opts: Option<&IngestOptions>,
    ) -> Result<IngestStatus> {
        let payload = ndjson_gzip(events)?;
        self.ingest(
            dataset,
            payload,
            ContentType::Ndjson,
            ContentEncoding::Gzip,
            opts,
        )
        .await
    }
}
