//! Discord notifications for donation attempts.
//!
//! This module provides:
//! - [`DiscordNotifier`] for posting to a channel webhook
//! - Embed types for the webhook body
//! - The donation announcement builder
//!
//! Notifications are best effort: they run after the response is decided and
//! their failures never reach the donor.

mod client;
mod error;
mod messages;
mod types;

pub use client::DiscordNotifier;
pub use error::DiscordError;
pub use messages::{DONATION_COLOR, build_donation_message};
pub use types::{Embed, EmbedField, EmbedFooter, EmbedImage, WebhookMessage};
