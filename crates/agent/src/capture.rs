//! Capture listeners: turn page fault events into [`ErrorRecord`]s.
//!
//! Two event sources exist, synchronous runtime errors and unhandled
//! promise rejections. Both normalise their input, consult the noise filter,
//! and hand surviving records to the [`DeliveryPump`].

use std::sync::atomic::{AtomicBool, Ordering};

use conflog_core::types::ErrorRecord;
use serde::Deserialize;

use crate::filter::should_ignore;
use crate::pump::DeliveryPump;
use crate::transport::Transport;

/// Source label given to every rejection record.
pub const PROMISE_SOURCE: &str = "Promise";

/// Message used when a rejection carries no usable message.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Unhandled Promise Rejection";

/// A thrown error object, as far as the page could serialise it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FaultObject {
    pub message: Option<String>,
    pub stack: Option<String>,
}

/// A synchronous runtime error event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeErrorEvent {
    pub message: String,
    pub filename: String,
    pub lineno: u32,
    pub colno: u32,
    /// Underlying error object, absent for some cross-origin or legacy
    /// errors.
    pub error: Option<FaultObject>,
}

impl RuntimeErrorEvent {
    pub fn into_record(self) -> ErrorRecord {
        ErrorRecord {
            message: self.message,
            source: self.filename,
            line: self.lineno,
            column: self.colno,
            stack: self.error.and_then(|e| e.stack).unwrap_or_default(),
        }
    }
}

/// Whatever a promise was rejected with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RejectionReason {
    Text(String),
    Fault(FaultObject),
    Other(serde_json::Value),
}

/// An unhandled promise rejection event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RejectionEvent {
    pub reason: Option<RejectionReason>,
}

impl RejectionEvent {
    pub fn into_record(self) -> ErrorRecord {
        let (message, stack) = match self.reason {
            Some(RejectionReason::Text(text)) if !text.is_empty() => (text, String::new()),
            Some(RejectionReason::Fault(FaultObject {
                message: Some(message),
                stack,
            })) if !message.is_empty() => (message, stack.unwrap_or_default()),
            _ => (DEFAULT_REJECTION_MESSAGE.to_string(), String::new()),
        };
        ErrorRecord {
            message,
            source: PROMISE_SOURCE.to_string(),
            line: 0,
            column: 0,
            stack,
        }
    }
}

/// One page fault event, as forwarded by the page bridge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum CaptureEvent {
    #[serde(rename = "error")]
    Error(RuntimeErrorEvent),
    #[serde(rename = "unhandledrejection")]
    UnhandledRejection(RejectionEvent),
}

/// The two listeners of one page session, wired to its pump.
pub struct ErrorCapture<T: Transport> {
    pump: DeliveryPump<T>,
    installed: AtomicBool,
}

impl<T: Transport> ErrorCapture<T> {
    pub fn new(pump: DeliveryPump<T>) -> Self {
        Self {
            pump,
            installed: AtomicBool::new(false),
        }
    }

    /// Wire the listeners. Only the first call in a session does anything;
    /// it returns `true`, later calls return `false`.
    pub fn install(&self) -> bool {
        let first = !self.installed.swap(true, Ordering::SeqCst);
        if first {
            tracing::debug!("Error capture installed");
        }
        first
    }

    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    /// Handle a runtime error event. Returns whether a record was queued.
    pub async fn on_error(&self, event: RuntimeErrorEvent) -> bool {
        if !self.is_installed() || should_ignore(&event.message, &event.filename) {
            return false;
        }
        self.pump.submit(event.into_record()).await
    }

    /// Handle an unhandled rejection. Returns whether a record was queued.
    pub async fn on_unhandled_rejection(&self, event: RejectionEvent) -> bool {
        if !self.is_installed() {
            return false;
        }
        let record = event.into_record();
        if should_ignore(&record.message, "") {
            return false;
        }
        self.pump.submit(record).await
    }

    pub async fn dispatch(&self, event: CaptureEvent) -> bool {
        match event {
            CaptureEvent::Error(e) => self.on_error(e).await,
            CaptureEvent::UnhandledRejection(e) => self.on_unhandled_rejection(e).await,
        }
    }

    pub fn pump(&self) -> &DeliveryPump<T> {
        &self.pump
    }
}
