//! Persistence for the error log.
//!
//! - [`KvStore`] -- whole-value JSON storage collaborator.
//! - [`MemoryKv`] / [`PgKv`] -- in-process and PostgreSQL backends.
//! - [`ErrorLogStore`] -- the bounded log, mutated under a single writer.

pub mod error;
pub mod kv;
pub mod log_store;
pub mod postgres;

use sqlx::postgres::PgPoolOptions;

pub use error::DbError;
pub use kv::{KvStore, MemoryKv};
pub use log_store::{ErrorLogStore, LOG_KEY};
pub use postgres::PgKv;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
