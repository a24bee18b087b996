//! Integration tests for the donation endpoint.

use axum::http::StatusCode;
use secrecy::SecretString;
use serde_json::json;

use supportme_integration_tests::TestApp;
use supportme_site::config::{DiscordConfig, SiteConfig};

const DONATE: &str = "/api/donate-webhook";

#[tokio::test]
async fn test_donation_uses_page_handle() {
    let app = TestApp::new();
    let response = app
        .post_json(DONATE, &json!({ "amount": 25, "name": "Sam" }), None)
        .await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(
        response.json(),
        json!({ "success": true, "paymentUrl": "https://cash.app/$sigmabread/25" })
    );
}

#[tokio::test]
async fn test_donation_follows_saved_handle() {
    let app = TestApp::new();
    let cookie = app.login().await;
    app.post_json(
        "/api/site-content",
        &json!({ "cashApp": "$josie" }),
        Some(&cookie),
    )
    .await;

    let response = app.post_json(DONATE, &json!({ "amount": "10.50" }), None).await;
    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.json()["paymentUrl"], "https://cash.app/$josie/10.5");
}

#[tokio::test]
async fn test_unusable_saved_handle_never_redirects_to_default() {
    let app = TestApp::new();
    let cookie = app.login().await;
    app.post_json(
        "/api/site-content",
        &json!({ "cashApp": "$josie" }),
        Some(&cookie),
    )
    .await;

    for bad in ["josie.bread", "josie bread", "   "] {
        let response = app
            .post_json("/api/site-content", &json!({ "cashApp": bad }), Some(&cookie))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "handle {bad:?}");
    }

    let response = app.post_json(DONATE, &json!({ "amount": 5 }), None).await;
    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.json()["paymentUrl"], "https://cash.app/$josie/5");
}

#[tokio::test]
async fn test_unusable_stored_handle_is_a_server_error() {
    let app = TestApp::new();
    app.state()
        .content()
        .store()
        .set("site_content", &json!({ "cashApp": "josie.bread" }))
        .await
        .expect("memory store");

    let response = app.post_json(DONATE, &json!({ "amount": 5 }), None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json(), json!({ "error": "Internal server error." }));
    assert!(!String::from_utf8_lossy(&response.body).contains("sigmabread"));
}

#[tokio::test]
async fn test_donation_with_explicit_handle() {
    let app = TestApp::new();
    let response = app
        .post_json(
            DONATE,
            &json!({ "amount": 5, "cashAppHandle": "someone_else" }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(
        response.json()["paymentUrl"],
        "https://cash.app/$someone_else/5"
    );
}

#[tokio::test]
async fn test_donation_below_minimum() {
    let app = TestApp::new();
    for amount in [json!(0), json!(0.99), json!(-5)] {
        let response = app.post_json(DONATE, &json!({ "amount": amount }), None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "amount {amount}");
        assert_eq!(
            response.json(),
            json!({ "error": "donation amount must be at least 1" })
        );
    }
}

#[tokio::test]
async fn test_donation_malformed_body() {
    let app = TestApp::new();
    for body in ["{}", "{\"amount\": \"lots\"}", "nope"] {
        let response = app.post_raw(DONATE, body, None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(
            response.json(),
            json!({ "error": "Invalid donation request." })
        );
    }
}

#[tokio::test]
async fn test_donation_invalid_handle() {
    let app = TestApp::new();
    let response = app
        .post_json(
            DONATE,
            &json!({ "amount": 5, "cashAppHandle": "bad handle!" }),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_donation_message_too_long() {
    let app = TestApp::new();
    let response = app
        .post_json(
            DONATE,
            &json!({ "amount": 5, "message": "x".repeat(1001) }),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_donation_with_unreachable_store_uses_default_handle() {
    let app = TestApp::with_unreachable_store();
    let response = app.post_json(DONATE, &json!({ "amount": 3 }), None).await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.json()["paymentUrl"], "https://cash.app/$sigmabread/3");
}

#[tokio::test]
async fn test_notification_failure_does_not_affect_response() {
    let app = TestApp::with_config(SiteConfig {
        discord: Some(DiscordConfig {
            webhook_url: SecretString::from("http://127.0.0.1:9/webhook"),
            ping_user_id: None,
        }),
        ..TestApp::config()
    });
    assert!(app.state().notifier().is_some());

    let response = app.post_json(DONATE, &json!({ "amount": 20 }), None).await;
    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.json()["success"], true);
}
