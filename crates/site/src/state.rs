//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::discord::DiscordNotifier;
use crate::services::{ContentService, SessionAuthority};
use crate::store::ContentStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Everything is built from one `SiteConfig` at
/// startup; there are no globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    sessions: SessionAuthority,
    content: ContentService,
    notifier: Option<DiscordNotifier>,
}

impl AppState {
    /// Create application state around an opened store.
    ///
    /// A Discord notifier is created only when a webhook is configured.
    #[must_use]
    pub fn new(config: SiteConfig, store: ContentStore) -> Self {
        let sessions = SessionAuthority::from_config(&config);
        let content = ContentService::new(store, config.content_key.clone());
        let notifier = config.discord.as_ref().and_then(|discord| {
            DiscordNotifier::new(discord)
                .inspect_err(|e| tracing::error!(error = %e, "Discord notifier unavailable"))
                .ok()
        });

        if config.discord.is_none() {
            tracing::warn!("DISCORD_WEBHOOK_URL is not set; donation notifications are disabled");
        }

        Self {
            inner: Arc::new(AppStateInner {
                config,
                sessions,
                content,
                notifier,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the admin session authority.
    #[must_use]
    pub fn sessions(&self) -> &SessionAuthority {
        &self.inner.sessions
    }

    /// Get a reference to the content service.
    #[must_use]
    pub fn content(&self) -> &ContentService {
        &self.inner.content
    }

    /// Get the donation notifier, if one is configured.
    #[must_use]
    pub fn notifier(&self) -> Option<&DiscordNotifier> {
        self.inner.notifier.as_ref()
    }
}
