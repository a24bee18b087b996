//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during admin authentication.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No admin secret is configured on the server.
    #[error("admin login is not configured")]
    NotConfigured,

    /// The provided secret does not match.
    #[error("invalid credentials")]
    InvalidCredential,

    /// The session token could not be decoded.
    #[error("malformed session token")]
    MalformedToken,

    /// The session token signature does not verify.
    #[error("session token signature mismatch")]
    BadSignature,

    /// The session token is past its expiry or claims a longer lifetime than allowed.
    #[error("session token expired")]
    Expired,
}
