//! Error ingestion handler.
//!
//! Public: any page visitor may report. The page nonce stands in for
//! authentication and only proves the report came from a page this server
//! rendered a context for.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use conflog_core::error::CoreError;
use conflog_core::receipt::finalize_report;
use conflog_core::wire::{ErrorReport, ACTION_LOG_ERROR};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoggedResponse {
    pub logged: bool,
}

// ---------------------------------------------------------------------------
// POST /errors
// ---------------------------------------------------------------------------

/// Verify, finalize and append one delivered error report.
pub async fn log_error(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ErrorReport>, JsonRejection>,
) -> AppResult<Json<DataResponse<LoggedResponse>>> {
    // Field-level problems are coerced by `ErrorReport`; only a body that is
    // not a JSON object at all ends up here.
    let Json(report) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if !state.nonces.verify(ACTION_LOG_ERROR, &report.nonce) {
        return Err(CoreError::Forbidden("Invalid or expired nonce".into()).into());
    }

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let snapshot = state.components.snapshot().await;
    let entry = finalize_report(report, user_agent, &snapshot, chrono::Utc::now());
    let suspected = entry.suspected_component.as_ref().map(|s| s.name.clone());

    let id = state.store.append(entry).await?;

    tracing::info!(
        log_id = %id,
        suspected = suspected.as_deref().unwrap_or("-"),
        "Error logged",
    );

    Ok(Json(DataResponse {
        data: LoggedResponse { logged: true },
    }))
}
