//! Delivery of captured records to the receiving server.

use std::time::Duration;

use async_trait::async_trait;
use conflog_core::types::ErrorRecord;
use conflog_core::wire::{ErrorReport, PageContext};

use crate::error::AgentError;

/// Hands one record to the receiving side.
///
/// The pump treats every call as fire-and-forget: a returned error is logged
/// and the record is dropped.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn deliver(&self, record: &ErrorRecord) -> Result<(), AgentError>;
}

/// POSTs each record as JSON to the ingest endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    ingest_url: String,
    page: PageContext,
    page_url: String,
}

impl HttpTransport {
    /// `server_url` is the server root; the ingest path comes from the page
    /// context handed out by the bootstrap endpoint.
    pub fn new(
        client: reqwest::Client,
        server_url: &str,
        page: PageContext,
        page_url: impl Into<String>,
    ) -> Self {
        let ingest_url = format!("{}{}", server_url.trim_end_matches('/'), page.ingest_url);
        Self {
            client,
            ingest_url,
            page,
            page_url: page_url.into(),
        }
    }

    pub fn ingest_url(&self) -> &str {
        &self.ingest_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn deliver(&self, record: &ErrorRecord) -> Result<(), AgentError> {
        let report = ErrorReport::from_record(record, &self.page, &self.page_url);
        self.client
            .post(&self.ingest_url)
            .json(&report)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Build the HTTP client used for bootstrap and delivery.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, AgentError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
