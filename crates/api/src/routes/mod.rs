pub mod admin;
pub mod errors;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /page-context                 page bootstrap (public)
/// /errors                       ingest (public, nonce-checked)
///
/// /admin/errors                 list (viewer), clear (admin)
/// /admin/errors/summary         per-component tallies (viewer)
/// /admin/errors/{id}            delete one (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/page-context",
            get(handlers::page_context::get_page_context),
        )
        .nest("/errors", errors::router())
        .nest("/admin/errors", admin::router())
}
