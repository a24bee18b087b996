//! Integration tests for admin login, status and logout.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use supportme_integration_tests::{ADMIN_SECRET, TestApp};
use supportme_site::config::SiteConfig;

fn token_of(cookie: &str) -> &str {
    cookie.strip_prefix("isAdmin=").expect("isAdmin cookie")
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_wrong_secrets_are_rejected_without_cookie() {
    let app = TestApp::new();

    for wrong in [
        "",
        "wrong",
        "integration-test-admin-secre",
        "integration-test-admin-secret ",
        "INTEGRATION-TEST-ADMIN-SECRET",
    ] {
        let response = app.login_with(wrong).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "key {wrong:?}");
        assert_eq!(response.json(), json!({ "error": "Invalid secret key." }));
        assert!(response.session_cookie().is_none());
    }
}

#[tokio::test]
async fn test_missing_key_is_a_wrong_key() {
    let app = TestApp::new();
    let response = app.post_json("/api/admin-login", &json!({}), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_login_body() {
    let app = TestApp::new();
    let response = app.post_raw("/api/admin-login", "{not json", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn test_login_without_configured_secret() {
    let app = TestApp::with_config(SiteConfig::default());
    let response = app.login_with(ADMIN_SECRET).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({ "error": "Server not configured for admin login." })
    );
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new();
    let response = app.login_with(ADMIN_SECRET).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "success": true }));

    let set_cookie = response
        .set_cookies()
        .into_iter()
        .find(|c| c.starts_with("isAdmin="))
        .expect("session cookie");
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=86400"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("SameSite=Lax"));
    // plain http base URL in tests
    assert!(!set_cookie.contains("Secure"));
}

#[tokio::test]
async fn test_https_base_url_sets_secure_cookie() {
    let app = TestApp::with_config(SiteConfig {
        base_url: "https://support.example.com".to_string(),
        ..TestApp::config()
    });
    let response = app.login_with(ADMIN_SECRET).await;

    let set_cookie = response.set_cookies().join("\n");
    assert!(set_cookie.contains("Secure"));
}

// =============================================================================
// Status
// =============================================================================

#[tokio::test]
async fn test_status_without_cookie() {
    let app = TestApp::new();
    let response = app.get("/api/admin-login", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "isAdmin": false }));
}

#[tokio::test]
async fn test_status_true_after_login() {
    let app = TestApp::new();
    let cookie = app.login().await;
    assert!(app.is_admin(Some(&cookie)).await);
}

#[tokio::test]
async fn test_forged_cookies_are_not_admin() {
    let app = TestApp::new();
    for forged in ["isAdmin=true", "isAdmin=", "isAdmin=abc.def", "other=1"] {
        assert!(!app.is_admin(Some(forged)).await, "cookie {forged:?}");
    }
}

#[tokio::test]
async fn test_session_from_another_instance_is_not_admin() {
    let first = TestApp::new();
    let second = TestApp::new();
    let cookie = first.login().await;
    assert!(!second.is_admin(Some(&cookie)).await);
}

#[tokio::test]
async fn test_session_expires_after_24_hours() {
    let app = TestApp::new();
    let cookie = app.login().await;
    let token = token_of(&cookie);
    let sessions = app.state().sessions();
    let now = Utc::now();

    assert!(sessions.check_status_at(Some(token), now + Duration::hours(23)));
    assert!(!sessions.check_status_at(Some(token), now + Duration::hours(24) + Duration::seconds(1)));
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new();
    let cookie = app.login().await;

    let response = app.post_json("/api/admin-logout", &json!({}), Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "success": true }));

    let cleared = response
        .set_cookies()
        .into_iter()
        .find(|c| c.starts_with("isAdmin="))
        .expect("removal cookie");
    assert!(cleared.starts_with("isAdmin=;"));
    assert!(cleared.contains("Max-Age=0"));

    // the browser now sends no session
    assert!(!app.is_admin(None).await);
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = TestApp::new();
    for _ in 0..2 {
        let response = app.post_json("/api/admin-logout", &json!({}), None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.session_cookie().is_none());
    }
    assert!(!app.is_admin(None).await);
}
