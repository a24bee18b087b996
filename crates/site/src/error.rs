//! Unified error handling with Sentry integration.
//!
//! Every route handler returns `Result<T, AppError>`. Responses carry a JSON
//! body of the form `{"error": "<message>"}`; server-side failures are
//! captured to Sentry and their details never reach the client.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use supportme_core::DonationError;
use thiserror::Error;

use crate::services::{AuthError, ContentServiceError};
use crate::store::StoreError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Login failed or cannot be performed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Caller lacks a valid admin session.
    #[error("Unauthorized: Admin access required.")]
    Unauthorized,

    /// Request body is malformed or fails validation.
    #[error("{0}")]
    InvalidInput(String),

    /// Request body exceeds the configured limit.
    #[error("Request body too large.")]
    PayloadTooLarge,

    /// Content could not be read from the store.
    #[error("Failed to fetch site content: {0}")]
    FetchContent(#[source] StoreError),

    /// Content could not be written to the store.
    #[error("Failed to save site content: {0}")]
    SaveContent(#[source] StoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Message returned for content documents that fail validation.
pub const INVALID_CONTENT_MESSAGE: &str = "Invalid content format.";

impl From<ContentServiceError> for AppError {
    fn from(err: ContentServiceError) -> Self {
        match err {
            ContentServiceError::Invalid(_) => Self::InvalidInput(INVALID_CONTENT_MESSAGE.into()),
            ContentServiceError::Store(e) => Self::SaveContent(e),
        }
    }
}

impl From<DonationError> for AppError {
    fn from(err: DonationError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl AppError {
    /// Map a JSON body rejection to `InvalidInput` with `message`.
    ///
    /// Oversized bodies keep their 413.
    #[must_use]
    pub fn from_json_rejection(rejection: &JsonRejection, message: &str) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::InvalidInput(message.to_owned())
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Auth(AuthError::NotConfigured)
            | Self::FetchContent(_)
            | Self::SaveContent(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Message shown to the client.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Auth(AuthError::NotConfigured) => "Server not configured for admin login.".into(),
            Self::Auth(_) => "Invalid secret key.".into(),
            Self::FetchContent(_) => "Failed to fetch site content.".into(),
            Self::SaveContent(_) => "Failed to save site content.".into(),
            Self::Internal(_) => "Internal server error.".into(),
            Self::Unauthorized | Self::InvalidInput(_) | Self::PayloadTooLarge => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
