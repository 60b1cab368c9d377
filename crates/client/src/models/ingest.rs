//! Ingest models: submission options and the status the API reports back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::timestamp;

/// The status after an event ingestion operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngestStatus {
    /// Number of events that were successfully ingested.
    pub ingested: u64,
    /// Number of events that failed to ingest.
    pub failed: u64,
    /// The ingestion failures, one per failed event.
    pub failures: Vec<IngestFailure>,
    /// Number of bytes processed by the ingest.
    pub processed_bytes: u64,
    /// Number of blocks created on the server.
    pub blocks_created: u64,
    /// Length of the write-ahead log after the ingest.
    pub wal_length: u64,
}

/// The ingestion failure of a single event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngestFailure {
    /// The time the failing event carried.
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Why the event was rejected.
    pub error: String,
}

/// Optional parameters for the ingest operations.
///
/// The corresponding query-string keys are hyphenated (`timestamp-field`),
/// so they are rendered by [`IngestOptions::query_params`] rather than
/// derived from the field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Custom field to extract the ingestion timestamp from. The server
    /// defaults to `_time`.
    pub timestamp_field: Option<String>,
    /// Custom format for the timestamp field, in Go reference-time notation.
    pub timestamp_format: Option<String>,
    /// Delimiter separating CSV fields. Only valid when the ingested content
    /// is CSV formatted.
    pub csv_delimiter: Option<String>,
}

impl IngestOptions {
    /// Set the field to extract the ingestion timestamp from.
    pub fn with_timestamp_field(mut self, field: impl Into<String>) -> Self {
        self.timestamp_field = Some(field.into());
        self
    }

    /// Set the format of the timestamp field.
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = Some(format.into());
        self
    }

    /// Set the CSV delimiter.
    pub fn with_csv_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.csv_delimiter = Some(delimiter.into());
        self
    }

    /// Render the query-string parameters, one entry per set option.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = vec![];
        if let Some(field) = &self.timestamp_field {
            params.push(("timestamp-field", field.clone()));
        }
        if let Some(format) = &self.timestamp_format {
            params.push(("timestamp-format", format.clone()));
        }
        if let Some(delimiter) = &self.csv_delimiter {
            params.push(("csv-delimiter", delimiter.clone()));
        }
        params
    }
}

/// Content type of an ingest payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    Ndjson,
    Csv,
}

impl ContentType {
    /// The MIME type sent in the `Content-Type` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Ndjson => "application/x-ndjson",
            Self::Csv => "text/csv",
        }
    }
}

/// Content encoding of an ingest payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Identity,
    Gzip,
}

impl ContentEncoding {
    /// The value sent in the `Content-Encoding` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "1",
            Self::Gzip => "gzip",
        }
    }
}
