//! Discord webhook payload types.
//!
//! A subset of the execute-webhook body: one message with embeds.
//!
//! See: <https://discord.com/developers/docs/resources/webhook#execute-webhook>

use serde::Serialize;

/// Body posted to a Discord webhook URL.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookMessage {
    /// Display name override for the webhook user.
    pub username: String,
    /// Avatar override for the webhook user.
    pub avatar_url: String,
    /// Rich embeds.
    pub embeds: Vec<Embed>,
}

/// A rich embed.
#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    /// RGB color as an integer.
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    pub fields: Vec<EmbedField>,
    /// ISO-8601 timestamp shown in the embed footer.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

/// A name/value pair inside an embed.
#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    /// Field rendered side by side with its neighbours.
    #[must_use]
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }

    /// Field rendered on its own row.
    #[must_use]
    pub fn block(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}
