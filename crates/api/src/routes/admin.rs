//! Operator review routes. Mounted at `/admin/errors` by `api_routes()`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::error_logs;
use crate::state::AppState;

/// ```text
/// GET    /             -> list_errors
/// DELETE /             -> clear_errors (admin only)
/// GET    /summary      -> error_summary
/// DELETE /{id}         -> delete_error (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(error_logs::list_errors).delete(error_logs::clear_errors),
        )
        .route("/summary", get(error_logs::error_summary))
        .route("/{id}", delete(error_logs::delete_error))
}
