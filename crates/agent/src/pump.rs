//! Paced, single-flight delivery of queued records.
//!
//! [`DeliveryPump`] owns the dedup queue and the busy flag for one page
//! session. An accepted record starts a drain task if none is running. The
//! drain hands the head record to the transport without waiting for the
//! outcome, waits out the pacing interval, and repeats until the queue is
//! empty, at which point the pump goes idle. One record is handed off per
//! interval and records leave in insertion order, so a burst of N errors
//! takes about N pacing intervals to send however slow the endpoint is.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use conflog_core::types::ErrorRecord;
use tokio::sync::{Mutex, Notify};

use crate::queue::{DedupQueue, QueueEntry};
use crate::transport::Transport;

/// Minimum spacing between successive deliveries.
pub const PACING_INTERVAL: Duration = Duration::from_millis(1000);

struct PumpState {
    queue: DedupQueue,
    busy: bool,
}

struct PumpInner<T> {
    state: Mutex<PumpState>,
    transport: T,
    pacing: Duration,
    /// Deliveries handed off but not yet settled.
    in_flight: AtomicUsize,
    idle: Notify,
}

/// Queue plus drain loop for one page session. Cheap to clone.
pub struct DeliveryPump<T: Transport> {
    inner: Arc<PumpInner<T>>,
}

impl<T: Transport> Clone for DeliveryPump<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> DeliveryPump<T> {
    pub fn new(transport: T) -> Self {
        Self::with_pacing(transport, PACING_INTERVAL)
    }

    pub fn with_pacing(transport: T, pacing: Duration) -> Self {
        Self {
            inner: Arc::new(PumpInner {
                state: Mutex::new(PumpState {
                    queue: DedupQueue::new(),
                    busy: false,
                }),
                transport,
                pacing,
                in_flight: AtomicUsize::new(0),
                idle: Notify::new(),
            }),
        }
    }

    /// Queue a record and make sure a drain is running.
    ///
    /// Returns `false` when the queue declined the record (duplicate key or
    /// full). Must be called from within a Tokio runtime.
    pub async fn submit(&self, record: ErrorRecord) -> bool {
        let mut state = self.inner.state.lock().await;
        if !state.queue.enqueue(record) {
            return false;
        }
        if !state.busy {
            state.busy = true;
            tokio::spawn(drain(Arc::clone(&self.inner)));
        }
        true
    }

    pub async fn is_busy(&self) -> bool {
        self.inner.state.lock().await.busy
    }

    /// Number of records still waiting for delivery.
    pub async fn pending(&self) -> usize {
        self.inner.state.lock().await.queue.len()
    }

    /// Deliveries handed to the transport that have not settled yet.
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Resolve once the queue has drained and every handed-off delivery has
    /// settled.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if !self.is_busy().await && self.in_flight() == 0 {
                return;
            }
            notified.await;
        }
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }
}

async fn drain<T: Transport>(inner: Arc<PumpInner<T>>) {
    loop {
        let entry = {
            let mut state = inner.state.lock().await;
            match state.queue.pop_front() {
                Some(entry) => entry,
                None => {
                    state.busy = false;
                    inner.idle.notify_waiters();
                    return;
                }
            }
        };

        inner.in_flight.fetch_add(1, Ordering::SeqCst);
        tokio::spawn(deliver(Arc::clone(&inner), entry));

        tokio::time::sleep(inner.pacing).await;
    }
}

async fn deliver<T: Transport>(inner: Arc<PumpInner<T>>, entry: QueueEntry) {
    if let Err(e) = inner.transport.deliver(&entry.record).await {
        tracing::debug!(
            error = %e,
            message = %entry.record.message,
            "Failed to deliver error report",
        );
    }
    inner.in_flight.fetch_sub(1, Ordering::SeqCst);
    inner.idle.notify_waiters();
}
