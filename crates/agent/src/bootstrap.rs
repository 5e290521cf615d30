//! Page bootstrap: fetch the context a capture session needs from the
//! server before wiring listeners.

use conflog_core::wire::{PageContext, PAGE_CONTEXT_PATH};

use crate::config::AgentConfig;
use crate::error::AgentError;

/// Ask the server for a page context (nonce, component snapshot, ingest
/// path) for the configured page hook.
pub async fn fetch_page_context(
    client: &reqwest::Client,
    config: &AgentConfig,
) -> Result<PageContext, AgentError> {
    let url = format!(
        "{}{}",
        config.server_url.trim_end_matches('/'),
        PAGE_CONTEXT_PATH
    );
    let admin = if config.is_admin { "1" } else { "0" };

    let context = client
        .get(&url)
        .query(&[("hook", config.page_hook.as_str()), ("admin", admin)])
        .send()
        .await?
        .error_for_status()?
        .json::<DataEnvelope<PageContext>>()
        .await?
        .data;

    tracing::debug!(
        page = %context.current_page,
        is_admin = context.is_admin,
        components = context.active_components.len(),
        "Error logger initialized",
    );

    Ok(context)
}

/// The server wraps payloads in `{ "data": ... }`.
#[derive(Debug, serde::Deserialize)]
struct DataEnvelope<T> {
    data: T,
}
