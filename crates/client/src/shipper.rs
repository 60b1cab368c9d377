//! Batched, time-windowed shipping of log events to the ingest endpoint.
//!
//! # What this module handles:
//! - Buffering records in emission order and flushing them to an injected
//!   [`EventSink`] when the buffer reaches `max_batch` events or the flush
//!   interval elapses, whichever comes first
//! - Requeueing a failed batch at the front of the buffer, capped at
//!   `max_requeue` events, so transient sink failures do not lose records
//! - A final flush on [`ShipperHandle::close`]
//!
//! # What this module does NOT handle:
//! - Rendering `tracing` events into records (see [`crate::layer`])
//! - Transport retries (the sink's own retry policy applies per batch)
//!
//! # Invariants
//! - `emit` never blocks on network I/O and never returns an error; shipping
//!   failures are logged, not propagated.
//! - A flush atomically swaps the buffer for an empty one, so records are
//!   handed to exactly one flush and concurrent emits land in the next batch.
//! - The periodic trigger is a single recurring timer, independent of emit
//!   volume; worst-case delivery delay for a buffered record is `interval`.
//! - The buffer is unbounded between flushes apart from the requeue cap: a
//!   sink that keeps failing under a high emit rate drops the oldest
//!   requeued records once `max_requeue` is reached.

use futures::future::BoxFuture;
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{Notify, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use axiom_config::constants::{DEFAULT_FLUSH_INTERVAL_SECS, MAX_BATCH_EVENTS, MAX_REQUEUE_EVENTS};

use crate::error::Result;
use crate::models::IngestStatus;

/// A destination events can be shipped to.
///
/// [`crate::Client`] implements this by ingesting into a dataset; tests
/// inject in-memory sinks.
pub trait EventSink: Send + Sync + 'static {
    /// Ship a batch of events, returning the ingest status.
    fn ingest_events<'a>(
        &'a self,
        dataset: &'a str,
        events: &'a [Value],
    ) -> impl Future<Output = Result<IngestStatus>> + Send + 'a;
}

impl EventSink for crate::Client {
    fn ingest_events<'a>(
        &'a self,
        dataset: &'a str,
        events: &'a [Value],
    ) -> impl Future<Output = Result<IngestStatus>> + Send + 'a {
        crate::Client::ingest_events(self, dataset, events, None)
    }
}

/// Object-safe adapter over [`EventSink`] so the shipper can hold any sink
/// without being generic.
trait DynSink: Send + Sync {
    fn ingest<'a>(
        &'a self,
        dataset: &'a str,
        events: &'a [Value],
    ) -> BoxFuture<'a, Result<IngestStatus>>;
}

impl<S: EventSink> DynSink for S {
    fn ingest<'a>(
        &'a self,
        dataset: &'a str,
        events: &'a [Value],
    ) -> BoxFuture<'a, Result<IngestStatus>> {
        Box::pin(self.ingest_events(dataset, events))
    }
}

/// Options for a [`BatchShipper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipperOptions {
    /// Number of buffered events that triggers a size-based flush.
    pub max_batch: usize,
    /// Interval of the recurring time-based flush.
    pub interval: Duration,
    /// Upper bound on buffered events across failed-flush requeues.
    pub max_requeue: usize,
}

impl Default for ShipperOptions {
    fn default() -> Self {
        Self {
            max_batch: MAX_BATCH_EVENTS,
            interval: Duration::from_secs(DEFAULT_FLUSH_INTERVAL_SECS),
            max_requeue: MAX_REQUEUE_EVENTS,
        }
    }
}

impl ShipperOptions {
    /// Set the size-based flush threshold.
    pub fn with_max_batch(mut self, max_batch: usize) -> Self {
        self.max_batch = max_batch;
        self
    }

    /// Set the flush interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the requeue cap.
    pub fn with_max_requeue(mut self, max_requeue: usize) -> Self {
        self.max_requeue = max_requeue;
        self
    }
}

struct Shared {
    sink: Box<dyn DynSink>,
    dataset: String,
    buffer: Mutex<VecDeque<Value>>,
    wake: Notify,
    closed: AtomicBool,
    options: ShipperOptions,
}

impl Shared {
    fn lock_buffer(&self) -> MutexGuard<'_, VecDeque<Value>> {
        self.buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, record: Value) {
        if self.closed.load(Ordering::SeqCst) {
            warn!(dataset = %self.dataset, "record dropped, shipper is closed");
            return;
        }
        let buffered = {
            let mut buffer = self.lock_buffer();
            buffer.push_back(record);
            buffer.len()
        };
        if buffered >= self.options.max_batch {
            self.wake.notify_one();
        }
    }

    async fn flush(&self) {
        let batch: Vec<Value> = {
            let mut buffer = self.lock_buffer();
            if buffer.is_empty() {
                return;
            }
            buffer.drain(..).collect()
        };

        debug!(dataset = %self.dataset, events = batch.len(), "flushing buffered events");
        if let Err(error) = self.sink.ingest(&self.dataset, &batch).await {
            warn!(
                dataset = %self.dataset,
                events = batch.len(),
                %error,
                "failed to ship events, requeueing batch"
            );
            self.requeue(batch);
        }
    }

    /// Put a failed batch back at the front of the buffer so emission order
    /// survives a retry, dropping the oldest events beyond the requeue cap.
    fn requeue(&self, mut batch: Vec<Value>) {
        let mut buffer = self.lock_buffer();
        let available = self.options.max_requeue.saturating_sub(buffer.len());
        if batch.len() > available {
            let dropped = batch.len() - available;
            warn!(
                dataset = %self.dataset,
                dropped = dropped,
                "requeue cap reached, dropping oldest events"
            );
            batch.drain(..dropped);
        }
        for event in batch.into_iter().rev() {
            buffer.push_front(event);
        }
    }
}

struct ShipperControl {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// The batched log shipper.
///
/// Construct with [`BatchShipper::spawn`], which starts the background flush
/// task and returns a cheap-to-clone [`ShipperHandle`].
pub struct BatchShipper;

impl BatchShipper {
    /// Start a shipper over the given sink and dataset.
    ///
    /// Must be called within a tokio runtime; the recurring flush task is
    /// spawned on it.
    pub fn spawn<S: EventSink>(
        sink: S,
        dataset: impl Into<String>,
        options: ShipperOptions,
    ) -> ShipperHandle {
        let shared = Arc::new(Shared {
            sink: Box::new(sink),
            dataset: dataset.into(),
            buffer: Mutex::new(VecDeque::new()),
            wake: Notify::new(),
            closed: AtomicBool::new(false),
            options,
        });

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let task_shared = Arc::clone(&shared);
        let task = tokio::spawn(async move {
            // interval_at skips the immediate first tick a plain interval
            // would fire.
            let mut ticker = tokio::time::interval_at(
                tokio::time::Instant::now() + task_shared.options.interval,
                task_shared.options.interval,
            );
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => task_shared.flush().await,
                    _ = task_shared.wake.notified() => task_shared.flush().await,
                    _ = &mut shutdown_rx => {
                        task_shared.flush().await;
                        break;
                    }
                }
            }
        });

        ShipperHandle {
            shared,
            control: Arc::new(Mutex::new(Some(ShipperControl {
                shutdown: shutdown_tx,
                task,
            }))),
        }
    }
}

/// Handle to a running [`BatchShipper`].
///
/// Clones share the same buffer and background task.
#[derive(Clone)]
pub struct ShipperHandle {
    shared: Arc<Shared>,
    control: Arc<Mutex<Option<ShipperControl>>>,
}

impl ShipperHandle {
    /// Append a record to the buffer.
    ///
    /// Never blocks on network I/O and never fails; when the size threshold
    /// is reached the background task is woken to flush. Records emitted
    /// after [`ShipperHandle::close`] are dropped with a warning.
    pub fn emit(&self, record: Value) {
        self.shared.emit(record);
    }

    /// Flush the buffer now.
    ///
    /// A no-op when the buffer is empty. Shipping failures are logged and
    /// the batch is requeued; they are not returned.
    pub async fn flush(&self) {
        self.shared.flush().await;
    }

    /// Number of currently buffered records.
    pub fn buffered(&self) -> usize {
        self.shared.lock_buffer().len()
    }

    /// Whether the shipper has been closed.
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Perform a final flush, stop the recurring trigger and mark the
    /// shipper closed. Idempotent.
    pub async fn close(&self) {
        let control = {
            let mut slot = self
                .control
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            slot.take()
        };

        let Some(control) = control else {
            return;
        };

        let _ = control.shutdown.send(());
        let _ = control.task.await;
        self.shared.closed.store(true, Ordering::SeqCst);
        // Catch records that raced in between the task's final flush and the
        // closed flag.
        self.shared.flush().await;
        debug!(dataset = %self.shared.dataset, "shipper closed");
    }
}

impl fmt::Debug for ShipperHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShipperHandle")
            .field("dataset", &self.shared.dataset)
            .field("buffered", &self.buffered())
            .field("closed", &self.is_closed())
            .finish()
    }
}
