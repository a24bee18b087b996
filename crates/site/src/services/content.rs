//! Site content service.
//!
//! Owns the single `SiteContent` document. Reads fall back to the default
//! record without persisting it; writes replace the whole document.

use serde_json::Value as JsonValue;
use supportme_core::{ContentError, SiteContent};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::store::{ContentStore, StoreError};

/// Errors from content operations.
#[derive(Debug, Error)]
pub enum ContentServiceError {
    /// The document failed validation.
    #[error(transparent)]
    Invalid(#[from] ContentError),

    /// The store could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reads and writes the site content document.
#[derive(Debug, Clone)]
pub struct ContentService {
    store: ContentStore,
    key: String,
}

impl ContentService {
    /// Create a service storing its document under `key`.
    #[must_use]
    pub fn new(store: ContentStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &ContentStore {
        &self.store
    }

    /// The store key holding the document.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current document, or the default record if nothing is stored.
    ///
    /// Stored documents are returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn get(&self) -> Result<JsonValue, StoreError> {
        Ok(self
            .store
            .get(&self.key)
            .await?
            .unwrap_or_else(SiteContent::default_json))
    }

    /// Replace the document.
    ///
    /// Authorization is the caller's concern; this only validates and writes.
    ///
    /// # Errors
    ///
    /// - `ContentServiceError::Invalid` if `document` is not an object or a
    ///   known field holds a non-string; nothing is written
    /// - `ContentServiceError::Store` if the write fails
    #[instrument(skip(self, document), fields(key = %self.key))]
    pub async fn set(&self, document: &JsonValue) -> Result<(), ContentServiceError> {
        SiteContent::validate_document(document)?;
        self.store.set(&self.key, document).await?;
        info!("Site content updated");
        Ok(())
    }

    /// Cash App handle from the current document.
    ///
    /// Falls back to the default handle when the store fails or the document
    /// has none.
    pub async fn cash_app_handle(&self) -> String {
        let document = match self.get().await {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "Could not read site content; using default handle");
                return SiteContent::default().cash_app;
            }
        };

        SiteContent::cash_app_of(&document)
            .map_or_else(|| SiteContent::default().cash_app, str::to_owned)
    }
}
