//! Business logic behind the HTTP handlers.

pub mod auth;
pub mod content;

pub use auth::{AuthError, IssuedSession, SESSION_TTL, SessionAuthority, SessionToken};
pub use content::{ContentService, ContentServiceError};
