//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! sm-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `SITE_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//! - `SITE_STORE` - must be `postgres` or unset
//!
//! Migrations live in `crates/site/migrations/` and are embedded at build time.

use supportme_site::config::{ConfigError, SiteConfig, StoreConfig};
use supportme_site::store::{PostgresStore, StoreError};
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The configured store is not `PostgreSQL`.
    #[error("Migrations only apply to the postgres store (configured: {0})")]
    NotPostgres(&'static str),

    /// Connecting or migrating failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Run pending content store migrations.
///
/// # Errors
///
/// Returns an error if the store is not `PostgreSQL` or a migration fails.
pub async fn run() -> Result<(), MigrateError> {
    let config = SiteConfig::from_env()?;

    let StoreConfig::Postgres { database_url } = &config.store else {
        return Err(MigrateError::NotPostgres(config.store.kind()));
    };

    tracing::info!("Connecting to database...");
    let store = PostgresStore::connect(database_url).await?;

    tracing::info!("Running migrations...");
    store.migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
