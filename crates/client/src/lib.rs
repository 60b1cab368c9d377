//! Axiom REST API client.
//!
//! This crate provides a type-safe client for the Axiom log-analytics API:
//! event ingestion, APL and legacy structured queries, dataset / annotation /
//! dashboard / token / user management, and a `tracing` layer that ships log
//! events in batches.
//!
//! # Examples
//! ```rust,ignore
//! use axiom_client::{Client, Error};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::new()?;
//!
//!     let dataset = client.create_dataset("my-dataset", "a description").await?;
//!
//!     client
//!         .ingest_events(&dataset.name, &[json!({"foo": "bar"})], None)
//!         .await?;
//!
//!     let result = client.query(r#"['my-dataset']"#, None).await?;
//!     dbg!(result.matches);
//!
//!     client.delete_dataset(&dataset.name).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod decode;
pub mod error;
mod http;
pub mod layer;
pub mod models;
pub mod serde_helpers;
pub mod shipper;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use client::{Client, ClientBuilder, is_personal_token};
pub use error::{Error, Result};
pub use layer::AxiomLayer;
pub use shipper::{BatchShipper, EventSink, ShipperHandle, ShipperOptions};
