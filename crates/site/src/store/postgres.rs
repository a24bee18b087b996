//! `PostgreSQL` content store.
//!
//! # Table
//!
//! ```sql
//! site_kv (
//!     key        TEXT PRIMARY KEY,
//!     value      JSONB NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! )
//! ```
//!
//! # Migrations
//!
//! Migrations are stored in `crates/site/migrations/` and run via:
//! ```bash
//! cargo run -p supportme-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;

use super::StoreError;

/// Embedded migrations for the `site_kv` table.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Key-value store backed by the `site_kv` table.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to `PostgreSQL` with a small pool.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the connection cannot be established.
    pub async fn connect(database_url: &SecretString) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url.expose_secret())
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Migration` if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    pub async fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        let value: Option<Json<JsonValue>> =
            sqlx::query_scalar("SELECT value FROM site_kv WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value.map(|Json(v)| v))
    }

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    pub async fn set(&self, key: &str, value: &JsonValue) -> Result<(), StoreError> {
        sqlx::query(
            r"
            INSERT INTO site_kv (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            ",
        )
        .bind(key)
        .bind(Json(value))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Check database connectivity.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the database does not answer.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
