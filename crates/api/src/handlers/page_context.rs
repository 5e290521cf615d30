//! Page bootstrap handler.
//!
//! A page asks for its context once before it installs capture listeners:
//! where to deliver, which nonce to present, and what is enabled.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use conflog_core::sanitize::parse_flag;
use conflog_core::wire::{PageContext, ACTION_LOG_ERROR, INGEST_PATH};

use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /page-context`.
#[derive(Debug, Default, Deserialize)]
pub struct PageContextParams {
    /// Hook label of the rendered page (default: `frontend`).
    pub hook: Option<String>,
    /// A flag such as `1` or `true` when the page is an administration page.
    pub admin: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /page-context
// ---------------------------------------------------------------------------

/// Issue a fresh nonce and the current component snapshot for a page.
pub async fn get_page_context(
    State(state): State<AppState>,
    Query(params): Query<PageContextParams>,
) -> Json<DataResponse<PageContext>> {
    let snapshot = state.components.snapshot().await;
    let is_admin = params.admin.as_deref().is_some_and(parse_flag);
    let current_page = params
        .hook
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| "frontend".to_string());

    tracing::debug!(
        page = %current_page,
        is_admin,
        components = snapshot.components.len(),
        "Issued page context",
    );

    Json(DataResponse {
        data: PageContext {
            ingest_url: INGEST_PATH.to_string(),
            nonce: state.nonces.issue(ACTION_LOG_ERROR),
            active_components: snapshot.components,
            current_page,
            is_admin,
        },
    })
}
