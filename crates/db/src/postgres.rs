//! PostgreSQL-backed [`KvStore`] over the `conflog_options` table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbError;
use crate::kv::KvStore;

/// Stores each key as one JSONB row.
pub struct PgKv {
    pool: PgPool,
}

impl PgKv {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KvStore for PgKv {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DbError> {
        let value = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT value FROM conflog_options WHERE name = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO conflog_options (name, value) VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET value = EXCLUDED.value, updated_at = now()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
