//! Admin session authority.
//!
//! Decides whether a request carries admin authority, and mints that authority
//! in exchange for the shared admin secret.
//!
//! # Token format
//!
//! ```text
//! base64url("<issued_unix>.<expires_unix>.<nonce_hex>") "." base64url(hmac_sha256(claims))
//! ```
//!
//! Tokens are stateless: nothing is stored server-side, so logout is the
//! removal of the cookie carrying the token. There is no rate limiting or
//! lockout on login attempts.

mod error;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretSlice, SecretString};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};

pub use error::AuthError;

use crate::config::SiteConfig;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of an admin session.
pub const SESSION_TTL: Duration = Duration::hours(24);

const NONCE_LEN: usize = 16;
const GENERATED_KEY_LEN: usize = 32;

/// The claims of an admin session: who needs no field, since there is exactly
/// one admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    nonce: [u8; NONCE_LEN],
}

impl SessionToken {
    fn issue(now: DateTime<Utc>, ttl: Duration) -> Self {
        let mut nonce = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce);

        Self {
            issued_at: truncate_to_seconds(now),
            expires_at: truncate_to_seconds(now + ttl),
            nonce,
        }
    }

    /// When the session was created.
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// When the session stops being valid.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the session is expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    fn claims(&self) -> String {
        format!(
            "{}.{}.{}",
            self.issued_at.timestamp(),
            self.expires_at.timestamp(),
            hex::encode(self.nonce)
        )
    }

    fn parse_claims(claims: &str) -> Result<Self, AuthError> {
        let mut parts = claims.split('.');
        let (Some(issued), Some(expires), Some(nonce), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::MalformedToken);
        };

        let issued_at = parse_timestamp(issued)?;
        let expires_at = parse_timestamp(expires)?;
        let nonce: [u8; NONCE_LEN] = hex::decode(nonce)
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(AuthError::MalformedToken)?;

        Ok(Self {
            issued_at,
            expires_at,
            nonce,
        })
    }
}

/// A freshly issued session and its encoded form.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Decoded claims.
    pub token: SessionToken,
    /// Opaque string to hand to the client.
    pub encoded: String,
}

/// Issues and validates admin session tokens.
pub struct SessionAuthority {
    admin_secret: Option<SecretString>,
    signing_key: SecretSlice<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for SessionAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthority")
            .field("admin_secret_configured", &self.admin_secret.is_some())
            .field("signing_key", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionAuthority {
    /// Create an authority from explicit secrets.
    ///
    /// When `signing_key` is `None`, a random key is generated; tokens then
    /// stop verifying once the process restarts.
    #[must_use]
    pub fn new(admin_secret: Option<SecretString>, signing_key: Option<&SecretString>) -> Self {
        let signing_key = signing_key.map_or_else(
            || {
                let mut key = vec![0u8; GENERATED_KEY_LEN];
                rand::rng().fill_bytes(&mut key);
                SecretSlice::from(key)
            },
            |secret| SecretSlice::from(secret.expose_secret().as_bytes().to_vec()),
        );

        Self {
            admin_secret,
            signing_key,
            ttl: SESSION_TTL,
        }
    }

    /// Create an authority from the site configuration.
    #[must_use]
    pub fn from_config(config: &SiteConfig) -> Self {
        if config.admin_secret.is_none() {
            warn!("ADMIN_SECRET_KEY is not set; admin login is disabled");
        }
        if config.session_secret.is_none() {
            warn!("SITE_SESSION_SECRET is not set; using a random key, sessions end on restart");
        }

        Self::new(config.admin_secret.clone(), config.session_secret.as_ref())
    }

    /// Override the session lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Session lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Exchange the shared secret for a new session.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotConfigured`] if no admin secret is configured
    /// - [`AuthError::InvalidCredential`] if `provided` does not match
    pub fn login(&self, provided: &str) -> Result<IssuedSession, AuthError> {
        self.login_at(provided, Utc::now())
    }

    /// [`SessionAuthority::login`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`SessionAuthority::login`].
    #[instrument(skip_all)]
    pub fn login_at(&self, provided: &str, now: DateTime<Utc>) -> Result<IssuedSession, AuthError> {
        let expected = self.admin_secret.as_ref().ok_or(AuthError::NotConfigured)?;

        if !secrets_match(provided, expected.expose_secret()) {
            return Err(AuthError::InvalidCredential);
        }

        let token = SessionToken::issue(now, self.ttl);
        let encoded = self.encode(&token);
        debug!(expires_at = %token.expires_at, "Admin session issued");

        Ok(IssuedSession { token, encoded })
    }

    /// Whether `credential` is a valid, unexpired session token.
    ///
    /// Never fails: absent, malformed, forged or expired tokens yield `false`.
    #[must_use]
    pub fn check_status(&self, credential: Option<&str>) -> bool {
        self.check_status_at(credential, Utc::now())
    }

    /// [`SessionAuthority::check_status`] with an explicit clock.
    #[must_use]
    pub fn check_status_at(&self, credential: Option<&str>, now: DateTime<Utc>) -> bool {
        credential.is_some_and(|encoded| match self.verify(encoded, now) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Rejected session token");
                false
            }
        })
    }

    /// Decode and verify a token.
    ///
    /// # Errors
    ///
    /// Returns the reason the token is not acceptable.
    pub fn verify(&self, encoded: &str, now: DateTime<Utc>) -> Result<SessionToken, AuthError> {
        let (claims_b64, signature_b64) = encoded
            .split_once('.')
            .ok_or(AuthError::MalformedToken)?;

        let claims = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| AuthError::MalformedToken)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| AuthError::MalformedToken)?;

        // verify_slice compares in constant time
        self.mac()
            .chain_update(&claims)
            .verify_slice(&signature)
            .map_err(|_| AuthError::BadSignature)?;

        let claims = String::from_utf8(claims).map_err(|_| AuthError::MalformedToken)?;
        let token = SessionToken::parse_claims(&claims)?;

        if token.is_expired_at(now) || token.expires_at - token.issued_at > self.ttl {
            return Err(AuthError::Expired);
        }

        Ok(token)
    }

    fn encode(&self, token: &SessionToken) -> String {
        let claims = token.claims();
        let signature = self.mac().chain_update(claims.as_bytes()).finalize();

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(claims.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature.into_bytes())
        )
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length
        <HmacSha256 as Mac>::new_from_slice(self.signing_key.expose_secret())
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"))
    }
}

/// Compare two secrets without leaking where (or whether by length) they differ.
fn secrets_match(provided: &str, expected: &str) -> bool {
    let provided = Sha256::digest(provided.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    constant_time_compare(&provided, &expected)
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, AuthError> {
    s.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or(AuthError::MalformedToken)
}

fn truncate_to_seconds(t: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(t.timestamp(), 0).unwrap_or(t)
}
