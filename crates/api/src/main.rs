use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conflog_api::components::{ComponentSource, FileComponents, StaticComponents};
use conflog_api::config::ServerConfig;
use conflog_api::router::build_app_router;
use conflog_api::state::AppState;
use conflog_core::nonce::NonceIssuer;
use conflog_core::types::ComponentSnapshot;
use conflog_db::{ErrorLogStore, KvStore, MemoryKv, PgKv};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conflog_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Log storage ---
    let kv: Arc<dyn KvStore> = match &config.database_url {
        Some(database_url) => {
            let pool = conflog_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            conflog_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            conflog_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgKv::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, error log is kept in memory only");
            Arc::new(MemoryKv::new())
        }
    };

    // --- Component snapshot source ---
    let components: Arc<dyn ComponentSource> = match &config.components_file {
        Some(path) => {
            tracing::info!(path = %path, "Reading active components from file");
            Arc::new(FileComponents::new(path))
        }
        None => Arc::new(StaticComponents(ComponentSnapshot::default())),
    };

    // --- App state ---
    let state = AppState {
        store: Arc::new(ErrorLogStore::new(kv)),
        nonces: Arc::new(NonceIssuer::new(config.nonce_secret.clone())),
        components,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
