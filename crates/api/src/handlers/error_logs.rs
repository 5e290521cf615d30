//! Operator review handlers for the error log.
//!
//! Reading requires the viewer role; clearing and deleting require admin.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use conflog_core::summary::{summarize, LogSummary};
use conflog_core::types::FinalizedLogEntry;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireViewer};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub cleared: bool,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

// ---------------------------------------------------------------------------
// GET /admin/errors
// ---------------------------------------------------------------------------

/// All retained entries, newest first.
pub async fn list_errors(
    RequireViewer(_op): RequireViewer,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<FinalizedLogEntry>>>> {
    let entries = state.store.list().await?;
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// GET /admin/errors/summary
// ---------------------------------------------------------------------------

/// Per-component tallies over the retained entries.
pub async fn error_summary(
    RequireViewer(_op): RequireViewer,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<LogSummary>>> {
    let entries = state.store.list().await?;
    Ok(Json(DataResponse {
        data: summarize(&entries),
    }))
}

// ---------------------------------------------------------------------------
// DELETE /admin/errors
// ---------------------------------------------------------------------------

pub async fn clear_errors(
    RequireAdmin(op): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ClearedResponse>>> {
    state.store.clear().await?;

    tracing::info!(operator = %op.operator, "Error log cleared");

    Ok(Json(DataResponse {
        data: ClearedResponse { cleared: true },
    }))
}

// ---------------------------------------------------------------------------
// DELETE /admin/errors/{id}
// ---------------------------------------------------------------------------

/// Delete one entry. An unknown id is a no-op and still reports success.
pub async fn delete_error(
    RequireAdmin(op): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<DeletedResponse>>> {
    let removed = state.store.remove_by_id(&id).await?;

    tracing::info!(operator = %op.operator, log_id = %id, removed, "Error log entry deleted");

    Ok(Json(DataResponse {
        data: DeletedResponse { deleted: true },
    }))
}
