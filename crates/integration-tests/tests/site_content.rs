//! Integration tests for reading and writing site content.

use axum::http::StatusCode;
use serde_json::json;

use supportme_core::SiteContent;
use supportme_integration_tests::TestApp;

const CONTENT: &str = "/api/site-content";

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_empty_store_serves_default_record() {
    let app = TestApp::new();
    let response = app.get(CONTENT, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({
            "name": "sigmabread",
            "cashApp": "sigmabread",
            "description": "Creating content and sharing knowledge. Your support helps me continue doing what I love!",
            "aboutText": "Thanks for considering supporting my work! Every contribution helps me create better content and keep everything accessible for everyone.",
            "profileImage": "/dog-profile.jpg",
            "heroTitle": "Love what you do and make money too",
            "heroSubtitle": "Support sigmabread's work and help keep the content coming!",
        })
    );
}

#[tokio::test]
async fn test_default_record_is_not_persisted() {
    let app = TestApp::new();
    app.get(CONTENT, None).await;

    let stored = app
        .state()
        .content()
        .store()
        .get("site_content")
        .await
        .expect("memory store");
    assert!(stored.is_none());
}

// =============================================================================
// Writes
// =============================================================================

#[tokio::test]
async fn test_unauthorized_write_is_rejected() {
    let app = TestApp::new();
    let attempt = json!({ "name": "intruder" });

    for cookie in [None, Some("isAdmin=true"), Some("isAdmin=forged.token")] {
        let response = app.post_json(CONTENT, &attempt, cookie).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(
            response.json(),
            json!({ "error": "Unauthorized: Admin access required." })
        );
    }

    let current = app.get(CONTENT, None).await.json();
    assert_eq!(current, SiteContent::default_json());
}

#[tokio::test]
async fn test_unauthorized_check_precedes_body_validation() {
    let app = TestApp::new();
    let response = app.post_raw(CONTENT, "not json at all", None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_write_then_read_round_trip() {
    let app = TestApp::new();
    let cookie = app.login().await;
    let document = json!({
        "name": "Josie",
        "cashApp": "josie",
        "description": "hi",
        "aboutText": "about",
        "profileImage": "data:image/png;base64,iVBORw0KGgo=",
        "heroTitle": "title",
        "heroSubtitle": "subtitle",
    });

    let response = app.post_json(CONTENT, &document, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({ "success": true, "message": "Site content updated successfully." })
    );

    assert_eq!(app.get(CONTENT, None).await.json(), document);
}

#[tokio::test]
async fn test_partial_and_extra_fields_are_stored_verbatim() {
    let app = TestApp::new();
    let cookie = app.login().await;
    let document = json!({ "heroTitle": "only this", "theme": "dark" });

    let response = app.post_json(CONTENT, &document, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.get(CONTENT, None).await.json(), document);
}

#[tokio::test]
async fn test_sequential_writes_last_wins() {
    let app = TestApp::new();
    let cookie = app.login().await;
    let first = json!({ "name": "first", "heroTitle": "one" });
    let second = json!({ "name": "second" });

    app.post_json(CONTENT, &first, Some(&cookie)).await;
    app.post_json(CONTENT, &second, Some(&cookie)).await;

    assert_eq!(app.get(CONTENT, None).await.json(), second);
}

#[tokio::test]
async fn test_concurrent_writes_keep_one_document() {
    let app = TestApp::new();
    let cookie = app.login().await;
    let first = json!({ "name": "first", "heroTitle": "one" });
    let second = json!({ "name": "second", "aboutText": "two" });

    let (a, b) = tokio::join!(
        app.post_json(CONTENT, &first, Some(&cookie)),
        app.post_json(CONTENT, &second, Some(&cookie)),
    );
    assert_eq!(a.status, StatusCode::OK);
    assert_eq!(b.status, StatusCode::OK);

    let stored = app.get(CONTENT, None).await.json();
    assert!(stored == first || stored == second, "merged: {stored}");
}

#[tokio::test]
async fn test_invalid_documents_are_rejected() {
    let app = TestApp::new();
    let cookie = app.login().await;

    for bad in [
        json!([1, 2, 3]),
        json!("a string"),
        json!(42),
        json!(null),
        json!({ "name": 7 }),
        json!({ "cashApp": { "nested": true } }),
        json!({ "cashApp": "josie.bread" }),
    ] {
        let response = app.post_json(CONTENT, &bad, Some(&cookie)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "payload {bad}");
        assert_eq!(response.json(), json!({ "error": "Invalid content format." }));
    }

    assert_eq!(app.get(CONTENT, None).await.json(), SiteContent::default_json());
}

#[tokio::test]
async fn test_unparseable_body_is_invalid_input() {
    let app = TestApp::new();
    let cookie = app.login().await;
    let response = app.post_raw(CONTENT, "{\"name\": ", Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "Invalid content format." }));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = TestApp::with_config(supportme_site::config::SiteConfig {
        max_body_bytes: 64,
        ..TestApp::config()
    });
    let cookie = app.login().await;
    let document = json!({ "aboutText": "x".repeat(256) });

    let response = app.post_json(CONTENT, &document, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
}

// =============================================================================
// Store failures
// =============================================================================

#[tokio::test]
async fn test_unreachable_store_on_read() {
    let app = TestApp::with_unreachable_store();
    let response = app.get(CONTENT, None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({ "error": "Failed to fetch site content." })
    );
}

#[tokio::test]
async fn test_unreachable_store_on_write() {
    let app = TestApp::with_unreachable_store();
    let cookie = app.login().await;
    let response = app
        .post_json(CONTENT, &json!({ "name": "x" }), Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({ "error": "Failed to save site content." })
    );
}
