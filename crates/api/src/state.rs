use std::sync::Arc;

use conflog_core::nonce::NonceIssuer;
use conflog_db::ErrorLogStore;

use crate::components::ComponentSource;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The bounded error log.
    pub store: Arc<ErrorLogStore>,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
    /// Issues and checks page anti-forgery nonces.
    pub nonces: Arc<NonceIssuer>,
    /// Host-supplied snapshot of enabled components and the active theme.
    pub components: Arc<dyn ComponentSource>,
}
