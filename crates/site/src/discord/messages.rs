//! Discord message builders for donation notifications.

use chrono::{DateTime, SecondsFormat, Utc};
use supportme_core::{CashAppHandle, Donation};

use super::types::{Embed, EmbedField, EmbedFooter, EmbedImage, WebhookMessage};

const BOT_USERNAME: &str = "josie bot💖";
const BOT_AVATAR_URL: &str = "https://i.ibb.co/zh2sXYzD/baa8eys.jpg";
const FOOTER_TEXT: &str = "Powered by SupportMe";
const FOOTER_ICON_URL: &str = "https://blob.v0.dev/heart-icon.png";

/// Embed accent color (green).
pub const DONATION_COLOR: u32 = 0x0034_bf0d;

/// Build the announcement for a donation attempt.
///
/// Fields: Amount, Donor, Cash App Handle (inline) and Message. When
/// `ping_user_id` is set, the description mentions that user.
#[must_use]
pub fn build_donation_message(
    donation: &Donation,
    handle: &CashAppHandle,
    ping_user_id: Option<&str>,
    sent_at: DateTime<Utc>,
) -> WebhookMessage {
    let mut description = "A new supporter might have just sent a donation!".to_string();
    if let Some(user_id) = ping_user_id {
        description.push_str(&format!(" <@{user_id}>"));
    }

    WebhookMessage {
        username: BOT_USERNAME.to_string(),
        avatar_url: BOT_AVATAR_URL.to_string(),
        embeds: vec![Embed {
            title: "🎉 New Donation Received!".to_string(),
            description,
            color: DONATION_COLOR,
            thumbnail: Some(EmbedImage {
                url: BOT_AVATAR_URL.to_string(),
            }),
            fields: vec![
                EmbedField::inline("Amount", format!("${}", donation.amount_display())),
                EmbedField::inline("Donor", donation.donor_display()),
                EmbedField::inline("Cash App Handle", handle.to_string()),
                EmbedField::block("Message", donation.message_display()),
            ],
            timestamp: sent_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            footer: Some(EmbedFooter {
                text: FOOTER_TEXT.to_string(),
                icon_url: Some(FOOTER_ICON_URL.to_string()),
            }),
        }],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    fn sent_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_payload_shape() {
        let donation = Donation {
            amount: Decimal::new(2500, 2),
            name: Some("Sam".to_string()),
            message: Some("keep it up".to_string()),
            cash_app_handle: None,
        };
        let handle = CashAppHandle::parse("sigmabread").unwrap();

        let payload =
            serde_json::to_value(build_donation_message(&donation, &handle, None, sent_at()))
                .unwrap();

        assert_eq!(payload["username"], "josie bot💖");
        let embed = &payload["embeds"][0];
        assert_eq!(embed["title"], "🎉 New Donation Received!");
        assert_eq!(embed["color"], 0x34bf0d);
        assert_eq!(embed["timestamp"], "2025-06-01T12:30:00.000Z");
        assert_eq!(embed["footer"]["text"], "Powered by SupportMe");
        assert_eq!(
            embed["fields"],
            json!([
                { "name": "Amount", "value": "$25", "inline": true },
                { "name": "Donor", "value": "Sam", "inline": true },
                { "name": "Cash App Handle", "value": "$sigmabread", "inline": true },
                { "name": "Message", "value": "keep it up", "inline": false },
            ])
        );
        assert!(!embed["description"].as_str().unwrap().contains("<@"));
    }

    #[test]
    fn test_anonymous_placeholders() {
        let donation = Donation {
            name: Some("   ".to_string()),
            ..Donation::new(Decimal::new(5, 0))
        };
        let handle = CashAppHandle::parse("$someone").unwrap();
        let message = build_donation_message(&donation, &handle, None, sent_at());
        let fields = &message.embeds[0].fields;

        assert_eq!(fields[1].value, "Anonymous");
        assert_eq!(fields[2].value, "$someone");
        assert_eq!(fields[3].value, "No message provided.");
    }

    #[test]
    fn test_ping_user() {
        let donation = Donation::new(Decimal::ONE);
        let handle = CashAppHandle::parse("someone").unwrap();
        let message = build_donation_message(&donation, &handle, Some("1234"), sent_at());

        assert!(message.embeds[0].description.ends_with(" <@1234>"));
    }
}
