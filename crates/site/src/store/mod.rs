//! Content store: a key-value persistence abstraction for JSON documents.
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local map, used for tests and local development
//! - [`PostgresStore`] - `site_kv` table with a JSONB value column
//! - [`UpstashStore`] - Upstash Redis over its REST API
//!
//! Every backend stores one JSON value per key. Writes replace the whole value;
//! concurrent writers resolve last-write-wins with no merge.

pub mod memory;
pub mod postgres;
pub mod upstash;

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::config::StoreConfig;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use upstash::UpstashStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request to the remote store failed.
    #[error("kv request failed: {0}")]
    Request(String),

    /// Remote store answered with an error.
    #[error("kv error: {0}")]
    Remote(String),

    /// Value could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A content store backend.
///
/// Cheaply cloneable; all variants share their underlying connection or map.
#[derive(Debug, Clone)]
pub enum ContentStore {
    Memory(MemoryStore),
    Postgres(PostgresStore),
    Upstash(UpstashStore),
}

impl ContentStore {
    /// Open the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a database pool cannot be created.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        match config {
            StoreConfig::Memory => Ok(Self::memory()),
            StoreConfig::Postgres { database_url } => {
                Ok(Self::Postgres(PostgresStore::connect(database_url).await?))
            }
            StoreConfig::Upstash { url, token } => {
                Ok(Self::Upstash(UpstashStore::new(url.clone(), token.clone())?))
            }
        }
    }

    /// A fresh, empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Short backend name used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
            Self::Upstash(_) => "upstash",
        }
    }

    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    pub async fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        match self {
            Self::Memory(store) => Ok(store.get(key).await),
            Self::Postgres(store) => store.get(key).await,
            Self::Upstash(store) => store.get(key).await,
        }
    }

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or rejects the write.
    pub async fn set(&self, key: &str, value: &JsonValue) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => {
                store.set(key, value.clone()).await;
                Ok(())
            }
            Self::Postgres(store) => store.set(key, value).await,
            Self::Upstash(store) => store.set(key, value).await,
        }
    }

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend does not answer.
    pub async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Self::Memory(_) => Ok(()),
            Self::Postgres(store) => store.ping().await,
            Self::Upstash(store) => store.ping().await,
        }
    }
}
