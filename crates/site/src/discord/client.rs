//! Discord webhook client.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use supportme_core::{CashAppHandle, Donation};
use tracing::{debug, error, instrument};

use super::error::DiscordError;
use super::messages::build_donation_message;
use super::types::WebhookMessage;
use crate::config::DiscordConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts donation announcements to a Discord channel webhook.
#[derive(Clone)]
pub struct DiscordNotifier {
    client: Client,
    /// Webhook URLs embed their own token.
    webhook_url: SecretString,
    ping_user_id: Option<String>,
}

impl std::fmt::Debug for DiscordNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordNotifier")
            .field("webhook_url", &"[REDACTED]")
            .field("ping_user_id", &self.ping_user_id)
            .finish_non_exhaustive()
    }
}

impl DiscordNotifier {
    /// Create a notifier for the configured webhook.
    ///
    /// # Errors
    ///
    /// Returns `DiscordError::Request` if the HTTP client cannot be built.
    pub fn new(config: &DiscordConfig) -> Result<Self, DiscordError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DiscordError::Request(e.to_string()))?;

        Ok(Self {
            client,
            webhook_url: config.webhook_url.clone(),
            ping_user_id: config.ping_user_id.clone(),
        })
    }

    /// Announce a donation without waiting for Discord.
    ///
    /// The send runs on a spawned task; failures are logged and dropped.
    pub fn notify(&self, donation: Donation, handle: CashAppHandle) {
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send_donation(&donation, &handle).await {
                error!(error = %e, "Failed to send donation notification");
            }
        });
    }

    /// Announce a donation and wait for Discord's answer.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or Discord rejects the message.
    pub async fn send_donation(
        &self,
        donation: &Donation,
        handle: &CashAppHandle,
    ) -> Result<(), DiscordError> {
        let message =
            build_donation_message(donation, handle, self.ping_user_id.as_deref(), Utc::now());
        self.execute(&message).await
    }

    /// Post a message to the webhook.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or Discord answers with a non-2xx status.
    #[instrument(skip_all)]
    pub async fn execute(&self, message: &WebhookMessage) -> Result<(), DiscordError> {
        let response = self
            .client
            .post(self.webhook_url.expose_secret())
            .json(message)
            .send()
            .await
            .map_err(|e| DiscordError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DiscordError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!(%status, "Discord webhook delivered");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn config(url: &str) -> DiscordConfig {
        DiscordConfig {
            webhook_url: SecretString::from(url),
            ping_user_id: Some("1234".to_string()),
        }
    }

    #[test]
    fn test_debug_redacts_webhook_url() {
        let notifier =
            DiscordNotifier::new(&config("https://discord.com/api/webhooks/1/secret_token"))
                .unwrap();
        let debug_output = format!("{notifier:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("secret_token"));
    }

    #[tokio::test]
    async fn test_unreachable_webhook_is_request_error() {
        let notifier = DiscordNotifier::new(&config("http://127.0.0.1:9/webhook")).unwrap();
        let result = notifier
            .send_donation(
                &Donation::new(Decimal::ONE),
                &CashAppHandle::parse("someone").unwrap(),
            )
            .await;
        assert!(matches!(result, Err(DiscordError::Request(_))));
    }
}
