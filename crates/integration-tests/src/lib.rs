//! Integration test harness for SupportMe.
//!
//! Drives the site router in-process with `tower::ServiceExt::oneshot`; no
//! network listener or external services are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p supportme-integration-tests
//! ```

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use url::Url;

use supportme_site::config::SiteConfig;
use supportme_site::state::AppState;
use supportme_site::store::{ContentStore, UpstashStore};

/// Admin secret configured by [`TestApp::new`].
pub const ADMIN_SECRET: &str = "integration-test-admin-secret";

/// A site instance backed by an in-memory store.
pub struct TestApp {
    router: Router,
    state: AppState,
}

/// A fully buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestApp {
    /// Site with [`ADMIN_SECRET`] configured and an empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Self::config())
    }

    /// Default test configuration.
    #[must_use]
    pub fn config() -> SiteConfig {
        SiteConfig {
            admin_secret: Some(SecretString::from(ADMIN_SECRET)),
            ..SiteConfig::default()
        }
    }

    /// Site with a custom configuration and an empty memory store.
    #[must_use]
    pub fn with_config(config: SiteConfig) -> Self {
        Self::with_store(config, ContentStore::memory())
    }

    /// Site whose store refuses every connection.
    ///
    /// # Panics
    ///
    /// Never in practice; the URL is a literal.
    #[must_use]
    pub fn with_unreachable_store() -> Self {
        let store = UpstashStore::new(
            Url::parse("http://127.0.0.1:9/").expect("valid url"),
            SecretString::from("token"),
        )
        .expect("client builds");
        Self::with_store(Self::config(), ContentStore::Upstash(store))
    }

    /// Site around an explicit store.
    #[must_use]
    pub fn with_store(config: SiteConfig, store: ContentStore) -> Self {
        let state = AppState::new(config, store);
        Self {
            router: supportme_site::app(state.clone()),
            state,
        }
    }

    /// Shared application state, for assertions that bypass HTTP.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Send a request through the router.
    ///
    /// # Panics
    ///
    /// If the body cannot be buffered.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET uri`, optionally with a `Cookie` header.
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(build_request(Method::GET, uri, cookie, None))
            .await
    }

    /// `POST uri` with a JSON body.
    pub async fn post_json(
        &self,
        uri: &str,
        body: &JsonValue,
        cookie: Option<&str>,
    ) -> TestResponse {
        self.send(build_request(
            Method::POST,
            uri,
            cookie,
            Some(body.to_string()),
        ))
        .await
    }

    /// `POST uri` with a raw body labelled as JSON.
    pub async fn post_raw(&self, uri: &str, body: &str, cookie: Option<&str>) -> TestResponse {
        self.send(build_request(
            Method::POST,
            uri,
            cookie,
            Some(body.to_owned()),
        ))
        .await
    }

    /// `POST /api/admin-login` with `key`.
    pub async fn login_with(&self, key: &str) -> TestResponse {
        self.post_json(
            "/api/admin-login",
            &serde_json::json!({ "key": key }),
            None,
        )
        .await
    }

    /// Log in with [`ADMIN_SECRET`] and return the cookie pair.
    ///
    /// # Panics
    ///
    /// If login does not succeed.
    pub async fn login(&self) -> String {
        let response = self.login_with(ADMIN_SECRET).await;
        assert_eq!(response.status, StatusCode::OK, "login should succeed");
        response.session_cookie().expect("session cookie set")
    }

    /// Value of `isAdmin` from the status endpoint.
    pub async fn is_admin(&self, cookie: Option<&str>) -> bool {
        let response = self.get("/api/admin-login", cookie).await;
        response.json()["isAdmin"] == JsonValue::Bool(true)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestResponse {
    /// Body parsed as JSON.
    ///
    /// # Panics
    ///
    /// If the body is not JSON.
    #[must_use]
    pub fn json(&self) -> JsonValue {
        serde_json::from_slice(&self.body).expect("JSON body")
    }

    /// All `Set-Cookie` header values.
    #[must_use]
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_owned)
            .collect()
    }

    /// `isAdmin=<token>` from a `Set-Cookie` that sets a non-empty session.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.set_cookies().into_iter().find_map(|cookie| {
            let pair = cookie.split(';').next()?.trim().to_owned();
            let value = pair.strip_prefix("isAdmin=")?;
            (!value.is_empty()).then_some(pair)
        })
    }
}

fn build_request(
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<String>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let body = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(body)
        }
        None => Body::empty(),
    };

    builder.body(body).expect("valid request")
}
