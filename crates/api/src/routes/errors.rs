//! Public ingest route. Mounted at `/errors` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::ingest;
use crate::state::AppState;

/// ```text
/// POST   /        -> log_error
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(ingest::log_error))
}
