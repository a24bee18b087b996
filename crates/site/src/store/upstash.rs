//! Upstash Redis REST content store.
//!
//! Commands are posted as JSON arrays (`["GET", key]`) with a bearer token and
//! answered with `{"result": ...}` or `{"error": "..."}`. Values are stored as
//! JSON text so other Upstash clients read them back as the same document.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::{debug, instrument};
use url::Url;

use super::StoreError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Key-value store backed by Upstash Redis.
#[derive(Clone)]
pub struct UpstashStore {
    client: Client,
    url: Url,
    token: SecretString,
}

impl std::fmt::Debug for UpstashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstashStore")
            .field("url", &self.url.as_str())
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct CommandResponse {
    #[serde(default)]
    result: Option<JsonValue>,
    #[serde(default)]
    error: Option<String>,
}

impl UpstashStore {
    /// Create a client for the REST endpoint at `url`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Request` if the HTTP client cannot be built.
    pub fn new(url: Url, token: SecretString) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Request(e.to_string()))?;

        Ok(Self { client, url, token })
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Upstash reports an error.
    pub async fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        let result = self.command(&["GET", key]).await?;
        Ok(decode_stored(result))
    }

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Upstash reports an error.
    pub async fn set(&self, key: &str, value: &JsonValue) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(value)?;
        self.command(&["SET", key, &encoded]).await?;
        Ok(())
    }

    /// Check that the endpoint answers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Upstash reports an error.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.command(&["PING"]).await?;
        Ok(())
    }

    #[instrument(skip(self, args), fields(command = args.first().copied().unwrap_or_default()))]
    async fn command(&self, args: &[&str]) -> Result<JsonValue, StoreError> {
        let response = self
            .client
            .post(self.url.clone())
            .bearer_auth(self.token.expose_secret())
            .json(args)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        let body: CommandResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Request(format!("invalid response ({status}): {e}")))?;

        if let Some(error) = body.error {
            return Err(StoreError::Remote(error));
        }

        if !status.is_success() {
            return Err(StoreError::Remote(format!("unexpected status {status}")));
        }

        debug!(%status, "Upstash command completed");

        Ok(body.result.unwrap_or(JsonValue::Null))
    }
}

/// Turn a `GET` result back into the stored document.
///
/// Strings holding JSON text are parsed; anything that is not JSON text is
/// returned as a plain string.
fn decode_stored(result: JsonValue) -> Option<JsonValue> {
    match result {
        JsonValue::Null => None,
        JsonValue::String(text) => {
            Some(serde_json::from_str(&text).unwrap_or(JsonValue::String(text)))
        }
        other => Some(other),
    }
}
