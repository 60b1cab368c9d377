//! A `tracing` layer that ships log events to an Axiom dataset.
//!
//! Each event is rendered to a flat JSON record (timestamp, level, target,
//! message and every recorded field) and handed to a [`BatchShipper`], which
//! batches and flushes in the background. Emitting is synchronous and never
//! fails, so logging cannot crash the host application.

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::client::Client;
use crate::shipper::{BatchShipper, ShipperHandle, ShipperOptions};

/// Targets whose events are never shipped: shipping performs HTTP requests
/// through these crates, and forwarding their own log events back into the
/// shipper would loop.
const SUPPRESSED_TARGETS: &[&str] = &[
    "axiom_client",
    "reqwest",
    "hyper",
    "h2",
    "rustls",
    "tower",
    "want",
    "mio",
];

/// A `tracing_subscriber` layer that forwards events to an Axiom dataset.
///
/// ```rust,ignore
/// use axiom_client::{AxiomLayer, Client};
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let client = Client::new()?;
/// let layer = AxiomLayer::new(&client, "my-logs");
/// let subscriber = tracing_subscriber::registry().with(layer);
/// // ... install the subscriber, log away, then before exit:
/// // client.shutdown().await;
/// ```
pub struct AxiomLayer {
    handle: ShipperHandle,
}

impl AxiomLayer {
    /// Create a layer shipping to the given dataset with default batching
    /// (1000 events or 1 second, whichever comes first).
    ///
    /// The shipper is registered on the client's shutdown hooks, so
    /// [`Client::shutdown`] flushes any buffered events. Must be called
    /// within a tokio runtime.
    pub fn new(client: &Client, dataset: impl Into<String>) -> Self {
        Self::with_options(client, dataset, ShipperOptions::default())
    }

    /// Create a layer with explicit batching options.
    pub fn with_options(
        client: &Client,
        dataset: impl Into<String>,
        options: ShipperOptions,
    ) -> Self {
        let handle = BatchShipper::spawn(client.clone(), dataset, options);
        client.before_shutdown(handle.clone());
        Self { handle }
    }

    /// Create a layer over an already-running shipper.
    pub fn from_handle(handle: ShipperHandle) -> Self {
        Self { handle }
    }

    /// The handle of the underlying shipper.
    pub fn handle(&self) -> &ShipperHandle {
        &self.handle
    }
}

impl<S: Subscriber> Layer<S> for AxiomLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        if SUPPRESSED_TARGETS
            .iter()
            .any(|suppressed| target.starts_with(suppressed))
        {
            return;
        }

        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let mut record = visitor.fields;
        record.insert(
            "_time".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record.insert(
            "level".to_string(),
            Value::String(metadata.level().as_str().to_lowercase()),
        );
        record.insert("target".to_string(), Value::String(target.to_string()));

        self.handle.emit(Value::Object(record));
    }
}

/// Collects event fields into a JSON object.
#[derive(Default)]
struct RecordVisitor {
    fields: Map<String, Value>,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), Value::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.fields
            .insert(field.name().to_string(), Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), Value::String(format!("{value:?}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppressed_targets_cover_transport_stack() {
        assert!(SUPPRESSED_TARGETS.contains(&"reqwest"));
        assert!(SUPPRESSED_TARGETS.contains(&"hyper"));
        assert!(SUPPRESSED_TARGETS.contains(&"axiom_client"));
    }
}
