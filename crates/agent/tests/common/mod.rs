#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use conflog_agent::error::AgentError;
use conflog_agent::transport::Transport;
use conflog_core::types::ErrorRecord;

/// Transport that records every delivery with its start time.
#[derive(Default)]
pub struct RecordingTransport {
    pub latency: Duration,
    pub fail: bool,
    deliveries: Mutex<Vec<(Instant, ErrorRecord)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingTransport {
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn deliveries(&self) -> Vec<(Instant, ErrorRecord)> {
        self.deliveries.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.deliveries()
            .into_iter()
            .map(|(_, r)| r.message)
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn deliver(&self, record: &ErrorRecord) -> Result<(), AgentError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.deliveries
            .lock()
            .unwrap()
            .push((Instant::now(), record.clone()));

        tokio::time::sleep(self.latency).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail {
            Err(AgentError::Config("endpoint unreachable".into()))
        } else {
            Ok(())
        }
    }
}

pub fn record(message: &str) -> ErrorRecord {
    ErrorRecord {
        message: message.into(),
        source: "https://site/ext/slider/slider.js".into(),
        line: 1,
        column: 1,
        stack: String::new(),
    }
}
