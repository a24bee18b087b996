//! Discord-related errors.

use thiserror::Error;

/// Errors that can occur when posting to a Discord webhook.
#[derive(Debug, Error)]
pub enum DiscordError {
    /// HTTP request failed.
    #[error("Discord request failed: {0}")]
    Request(String),

    /// Discord rejected the message.
    #[error("Discord API error ({status}): {body}")]
    Api {
        /// HTTP status returned by Discord.
        status: u16,
        /// Response body, as text.
        body: String,
    },
}
