//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_BASE_URL` - Public URL (default: <http://localhost:3000>). An `https://`
//!   URL marks a production deployment and turns on `Secure` cookies.
//! - `ADMIN_SECRET_KEY` - Shared admin secret. When unset, admin login fails
//!   with a configuration error instead of refusing to start.
//! - `SITE_SESSION_SECRET` - Session token signing key (min 32 chars, high
//!   entropy). A random key is generated per process when unset.
//! - `SITE_STORE` - `memory`, `postgres` or `upstash` (default: auto-detect)
//! - `SITE_DATABASE_URL` / `DATABASE_URL` - `PostgreSQL` connection string
//! - `KV_REST_API_URL` / `KV_REST_API_TOKEN` - Upstash Redis REST endpoint
//! - `SITE_CONTENT_KEY` - Store key of the content document (default: `site_content`)
//! - `SITE_MAX_BODY_BYTES` - Request body limit (default: 5 MiB)
//! - `DISCORD_WEBHOOK_URL` - Donation notification webhook
//! - `DISCORD_PING_USER_ID` - Discord user mentioned in notifications
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Default store key of the content document.
pub const DEFAULT_CONTENT_KEY: &str = "site_content";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the site
    pub base_url: String,
    /// Shared admin secret (absent means admin login is not configured)
    pub admin_secret: Option<SecretString>,
    /// Session token signing key (absent means a per-process random key)
    pub session_secret: Option<SecretString>,
    /// Content store backend
    pub store: StoreConfig,
    /// Key of the content document in the store
    pub content_key: String,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
    /// Donation notification webhook
    pub discord: Option<DiscordConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Content store backend selection.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// Process-local map; contents are lost on restart.
    Memory,
    /// `PostgreSQL` `site_kv` table.
    Postgres {
        /// Connection URL (contains password)
        database_url: SecretString,
    },
    /// Upstash Redis REST API.
    Upstash {
        /// REST endpoint URL
        url: Url,
        /// Bearer token
        token: SecretString,
    },
}

impl StoreConfig {
    /// Short name used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres { .. } => "postgres",
            Self::Upstash { .. } => "upstash",
        }
    }
}

/// Discord webhook configuration for donation notifications.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    /// Webhook URL (the URL itself is the credential)
    pub webhook_url: SecretString,
    /// Discord user ID to mention, if any
    pub ping_user_id: Option<String>,
}

impl Default for SiteConfig {
    /// Local development defaults: in-memory store, no admin secret.
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            admin_secret: None,
            session_secret: None,
            store: StoreConfig::Memory,
            content_key: DEFAULT_CONTENT_KEY.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            discord: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if the
    /// session secret fails validation (length, placeholder, entropy).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`SiteConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env
            .or_default("SITE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("SITE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_PORT".to_string(), e.to_string()))?;
        let base_url = env.or_default("SITE_BASE_URL", "http://localhost:3000");
        Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_BASE_URL".to_string(), e.to_string()))?;

        let admin_secret = env
            .optional("ADMIN_SECRET_KEY")
            .filter(|s| !s.is_empty())
            .map(SecretString::from);
        if let Some(secret) = &admin_secret
            && let Err(e) = validate_secret_strength(secret.expose_secret(), "ADMIN_SECRET_KEY")
        {
            tracing::warn!(error = %e, "Weak admin secret");
        }

        let session_secret = match env.optional("SITE_SESSION_SECRET") {
            Some(value) => {
                let secret = SecretString::from(value);
                validate_session_secret(&secret, "SITE_SESSION_SECRET")?;
                validate_secret_strength(secret.expose_secret(), "SITE_SESSION_SECRET")?;
                Some(secret)
            }
            None => None,
        };

        let store = StoreConfig::from_env(&env)?;
        let content_key = env.or_default("SITE_CONTENT_KEY", DEFAULT_CONTENT_KEY);
        let max_body_bytes = match env.optional("SITE_MAX_BODY_BYTES") {
            Some(value) => value.parse::<usize>().map_err(|e| {
                ConfigError::InvalidEnvVar("SITE_MAX_BODY_BYTES".to_string(), e.to_string())
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };
        let discord = DiscordConfig::from_env(&env)?;

        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env
            .optional("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = env
            .optional("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            admin_secret,
            session_secret,
            store,
            content_key,
            max_body_bytes,
            discord,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies must carry the `Secure` attribute.
    ///
    /// True for production deployments served over https.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl StoreConfig {
    fn from_env<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match env.optional("SITE_STORE").as_deref() {
            Some("memory") => Ok(Self::Memory),
            Some("postgres") => Ok(Self::Postgres {
                database_url: get_database_url(env)?,
            }),
            Some("upstash") => upstash_from_env(env),
            Some(other) => Err(ConfigError::InvalidEnvVar(
                "SITE_STORE".to_string(),
                format!("unknown store '{other}' (expected memory, postgres or upstash)"),
            )),
            None => {
                if let Ok(database_url) = get_database_url(env) {
                    Ok(Self::Postgres { database_url })
                } else if env.optional("KV_REST_API_URL").is_some() {
                    upstash_from_env(env)
                } else {
                    Ok(Self::Memory)
                }
            }
        }
    }
}

impl DiscordConfig {
    fn from_env<F>(env: &Env<F>) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(webhook_url) = env.optional("DISCORD_WEBHOOK_URL").filter(|s| !s.is_empty())
        else {
            return Ok(None);
        };
        Url::parse(&webhook_url).map_err(|e| {
            ConfigError::InvalidEnvVar("DISCORD_WEBHOOK_URL".to_string(), e.to_string())
        })?;

        Ok(Some(Self {
            webhook_url: SecretString::from(webhook_url),
            ping_user_id: env.optional("DISCORD_PING_USER_ID").filter(|s| !s.is_empty()),
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source wrapper so the same helpers serve the process environment
/// and tests.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        (self.0)(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }
}

/// Get database URL with fallback to generic `DATABASE_URL` (set by most PaaS
/// postgres attachments).
fn get_database_url<F>(env: &Env<F>) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    env.optional("SITE_DATABASE_URL")
        .or_else(|| env.optional("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar("SITE_DATABASE_URL".to_string()))
}

fn upstash_from_env<F>(env: &Env<F>) -> Result<StoreConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw_url = env.required("KV_REST_API_URL")?;
    let url = Url::parse(&raw_url)
        .map_err(|e| ConfigError::InvalidEnvVar("KV_REST_API_URL".to_string(), e.to_string()))?;
    let token = SecretString::from(env.required("KV_REST_API_TOKEN")?);

    Ok(StoreConfig::Upstash { url, token })
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STRONG_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6v";

    fn load(vars: &[(&str, &str)]) -> Result<SiteConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        SiteConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("changeme123", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength(STRONG_SECRET, "TEST_VAR").is_ok());
    }

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_err());
    }

    #[test]
    fn test_defaults_with_empty_environment() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.content_key, "site_content");
        assert!(config.admin_secret.is_none());
        assert!(config.session_secret.is_none());
        assert!(config.discord.is_none());
        assert!(matches!(config.store, StoreConfig::Memory));
        assert!(!config.secure_cookies());
    }

    #[test]
    fn test_https_base_url_enables_secure_cookies() {
        let config = load(&[("SITE_BASE_URL", "https://tips.example.org")]).unwrap();
        assert!(config.secure_cookies());
    }

    #[test]
    fn test_invalid_port() {
        let result = load(&[("SITE_PORT", "not-a-port")]);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(var, _)) if var == "SITE_PORT"));
    }

    #[test]
    fn test_empty_admin_secret_is_unset() {
        let config = load(&[("ADMIN_SECRET_KEY", "")]).unwrap();
        assert!(config.admin_secret.is_none());
    }

    #[test]
    fn test_weak_admin_secret_is_accepted() {
        let config = load(&[("ADMIN_SECRET_KEY", "hunter2")]).unwrap();
        assert_eq!(config.admin_secret.unwrap().expose_secret(), "hunter2");
    }

    #[test]
    fn test_short_session_secret_rejected() {
        let result = load(&[("SITE_SESSION_SECRET", "tooshort")]);
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_strong_session_secret_accepted() {
        let config = load(&[("SITE_SESSION_SECRET", STRONG_SECRET)]).unwrap();
        assert!(config.session_secret.is_some());
    }

    #[test]
    fn test_store_autodetect_postgres() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/site")]).unwrap();
        assert!(matches!(config.store, StoreConfig::Postgres { .. }));
    }

    #[test]
    fn test_store_autodetect_upstash() {
        let config = load(&[
            ("KV_REST_API_URL", "https://example-kv.upstash.io"),
            ("KV_REST_API_TOKEN", "token"),
        ])
        .unwrap();
        assert_eq!(config.store.kind(), "upstash");
    }

    #[test]
    fn test_explicit_upstash_requires_token() {
        let result = load(&[
            ("SITE_STORE", "upstash"),
            ("KV_REST_API_URL", "https://example-kv.upstash.io"),
        ]);
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(var)) if var == "KV_REST_API_TOKEN"));
    }

    #[test]
    fn test_unknown_store_rejected() {
        let result = load(&[("SITE_STORE", "sqlite")]);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_discord_config() {
        let config = load(&[
            ("DISCORD_WEBHOOK_URL", "https://discord.com/api/webhooks/1/abc"),
            ("DISCORD_PING_USER_ID", "1234"),
        ])
        .unwrap();
        let discord = config.discord.unwrap();
        assert_eq!(discord.ping_user_id.as_deref(), Some("1234"));
    }

    #[test]
    fn test_invalid_discord_url_rejected() {
        let result = load(&[("DISCORD_WEBHOOK_URL", "not a url")]);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&[
            ("ADMIN_SECRET_KEY", "super_secret_admin_key"),
            ("SITE_SESSION_SECRET", STRONG_SECRET),
        ])
        .unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("super_secret_admin_key"));
        assert!(!debug_output.contains(STRONG_SECRET));
    }

    #[test]
    fn test_socket_addr() {
        let config = SiteConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
