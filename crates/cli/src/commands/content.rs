//! Site content commands.
//!
//! # Usage
//!
//! ```bash
//! # Print the current document (or the default record)
//! sm-cli content show
//!
//! # Replace the document from a JSON file
//! sm-cli content import content.json
//! ```
//!
//! Uses the same store configuration as the site (`SITE_STORE`,
//! `SITE_DATABASE_URL`, `KV_REST_API_URL`, ...).

use std::path::Path;

use supportme_site::config::{ConfigError, SiteConfig};
use supportme_site::services::{ContentService, ContentServiceError};
use supportme_site::store::{ContentStore, StoreError};
use thiserror::Error;

/// Errors that can occur during content commands.
#[derive(Debug, Error)]
pub enum ContentCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store could not be opened or read.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The document was rejected or could not be written.
    #[error(transparent)]
    Content(#[from] ContentServiceError),

    /// The input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to a memory store would be lost on exit.
    #[error("No persistent store configured; set SITE_DATABASE_URL or KV_REST_API_URL")]
    NotPersistent,
}

async fn open_service() -> Result<ContentService, ContentCommandError> {
    let config = SiteConfig::from_env()?;
    let store = ContentStore::connect(&config.store).await?;
    tracing::info!(store = store.kind(), key = %config.content_key, "Opened content store");
    Ok(ContentService::new(store, config.content_key))
}

/// Print the current document as pretty JSON.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
#[allow(clippy::print_stdout)]
pub async fn show() -> Result<(), ContentCommandError> {
    let service = open_service().await?;
    let document = service.get().await?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

/// Replace the document with the contents of `path`.
///
/// # Errors
///
/// Returns an error if the file is unreadable, the document is invalid, or
/// no persistent store is configured.
pub async fn import(path: &Path) -> Result<(), ContentCommandError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ContentCommandError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let document: serde_json::Value = serde_json::from_str(&text)?;

    let service = open_service().await?;
    if matches!(service.store(), ContentStore::Memory(_)) {
        return Err(ContentCommandError::NotPersistent);
    }

    service.set(&document).await?;
    tracing::info!("Imported site content from {}", path.display());
    Ok(())
}
