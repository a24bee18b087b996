//! Editable page content.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::handle::{CashAppHandle, HandleError};

/// Errors that can occur when validating a content document.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The document is not a JSON object.
    #[error("content must be a JSON object")]
    NotAnObject,
    /// A known field holds something other than a string.
    #[error("field `{field}` must be a string")]
    FieldNotString {
        /// JSON name of the offending field.
        field: &'static str,
    },
    /// `cashApp` is a string but not a usable payment handle.
    #[error("field `cashApp` is not a valid payment handle: {0}")]
    InvalidHandle(#[source] HandleError),
}

/// The single persisted document describing the landing page.
///
/// Stored as one flat JSON record under a single key. Field names on the wire
/// are camelCase (`cashApp`, `heroTitle`, ...).
///
/// ## Examples
///
/// ```
/// use supportme_core::SiteContent;
///
/// let content = SiteContent::default();
/// assert_eq!(content.name, "sigmabread");
/// assert_eq!(content.hero_title, "Love what you do and make money too");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    /// Display name of the creator.
    pub name: String,
    /// Payment handle, stored without the leading `$`.
    pub cash_app: String,
    /// Short bio.
    pub description: String,
    /// Longer bio.
    pub about_text: String,
    /// URL or embedded data reference for the profile picture.
    pub profile_image: String,
    /// Landing headline.
    pub hero_title: String,
    /// Landing subheadline.
    pub hero_subtitle: String,
}

impl SiteContent {
    /// JSON names of every field, in declaration order.
    pub const FIELDS: [&'static str; 7] = [
        "name",
        "cashApp",
        "description",
        "aboutText",
        "profileImage",
        "heroTitle",
        "heroSubtitle",
    ];

    /// The default document as a JSON value.
    ///
    /// Served when nothing has been stored yet.
    #[must_use]
    pub fn default_json() -> JsonValue {
        serde_json::json!({
            "name": DEFAULT_NAME,
            "cashApp": DEFAULT_CASH_APP,
            "description": DEFAULT_DESCRIPTION,
            "aboutText": DEFAULT_ABOUT_TEXT,
            "profileImage": DEFAULT_PROFILE_IMAGE,
            "heroTitle": DEFAULT_HERO_TITLE,
            "heroSubtitle": DEFAULT_HERO_SUBTITLE,
        })
    }

    /// Validate a document submitted for storage.
    ///
    /// The document must be a JSON object. Missing fields and unknown extra
    /// fields are accepted so that a later read returns exactly what was
    /// written.
    ///
    /// Stricter than only requiring an object: known fields, when present,
    /// must be strings, and `cashApp` must parse as a [`CashAppHandle`].
    /// Donations are routed to the stored handle, so an unusable one is
    /// refused at save time.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the document is not an object, a known
    /// field has a non-string value, or `cashApp` is not a valid handle.
    pub fn validate_document(document: &JsonValue) -> Result<(), ContentError> {
        let object = document.as_object().ok_or(ContentError::NotAnObject)?;

        for field in Self::FIELDS {
            if let Some(value) = object.get(field)
                && !value.is_string()
            {
                return Err(ContentError::FieldNotString { field });
            }
        }

        if let Some(handle) = object.get("cashApp").and_then(JsonValue::as_str) {
            CashAppHandle::parse(handle).map_err(ContentError::InvalidHandle)?;
        }

        Ok(())
    }

    /// Read the payment handle out of a stored document, if it has one.
    #[must_use]
    pub fn cash_app_of(document: &JsonValue) -> Option<&str> {
        document
            .get("cashApp")
            .and_then(JsonValue::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

const DEFAULT_NAME: &str = "sigmabread";
const DEFAULT_CASH_APP: &str = "sigmabread";
const DEFAULT_DESCRIPTION: &str =
    "Creating content and sharing knowledge. Your support helps me continue doing what I love!";
const DEFAULT_ABOUT_TEXT: &str = "Thanks for considering supporting my work! Every contribution helps me create better content and keep everything accessible for everyone.";
const DEFAULT_PROFILE_IMAGE: &str = "/dog-profile.jpg";
const DEFAULT_HERO_TITLE: &str = "Love what you do and make money too";
const DEFAULT_HERO_SUBTITLE: &str = "Support sigmabread's work and help keep the content coming!";

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            cash_app: DEFAULT_CASH_APP.to_owned(),
            description: DEFAULT_DESCRIPTION.to_owned(),
            about_text: DEFAULT_ABOUT_TEXT.to_owned(),
            profile_image: DEFAULT_PROFILE_IMAGE.to_owned(),
            hero_title: DEFAULT_HERO_TITLE.to_owned(),
            hero_subtitle: DEFAULT_HERO_SUBTITLE.to_owned(),
        }
    }
}
