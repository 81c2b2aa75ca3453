mod common;

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::{Value, json};

#[tokio::test]
async fn test_redirect_success() {
    let app = common::create_test_app();
    common::create_test_link(&app.state, "redirect1", "https://example.com/target", None).await;

    let response = app.server.get("/redirect1").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = common::create_test_app();

    let response = app.server.get("/nonexistent").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let app = common::create_test_app();
    common::create_test_link(&app.state, "AbCd", "https://example.com", None).await;

    assert_eq!(
        app.server.get("/abcd").await.status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.server.get("/AbCd").await.status_code(),
        StatusCode::TEMPORARY_REDIRECT
    );
}

#[tokio::test]
async fn test_redirect_expiry_boundary() {
    let app = common::create_test_app();
    common::create_test_link(&app.state, "edge", "https://example.com", Some(1)).await;

    app.clock.advance(Duration::seconds(59));
    assert_eq!(
        app.server.get("/edge").await.status_code(),
        StatusCode::TEMPORARY_REDIRECT
    );

    app.clock.advance(Duration::seconds(1));
    let response = app.server.get("/edge").await;
    assert_eq!(response.status_code(), StatusCode::GONE);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "gone");
    assert_eq!(body["error"]["details"]["kind"], "expired");
}

#[tokio::test]
async fn test_expired_redirect_records_no_click() {
    let app = common::create_test_app();
    common::create_test_link(&app.state, "gone1", "https://example.com", Some(1)).await;

    app.server.get("/gone1").await;
    app.clock.advance(Duration::minutes(5));
    app.server.get("/gone1").await;
    app.server.get("/gone1").await;

    let record = app.state.registry.lookup("gone1").await.unwrap();
    assert_eq!(record.click_count, 1);
}

#[tokio::test]
async fn test_referrer_is_recorded() {
    let app = common::create_test_app();
    common::create_test_link(&app.state, "refd", "https://example.com", None).await;

    app.server
        .get("/refd")
        .add_header("Referer", "https://News.Example.org/story/1")
        .await;
    app.server
        .get("/refd")
        .add_header("User-Agent", "Googlebot/2.1")
        .await;

    let record = app.state.registry.lookup("refd").await.unwrap();
    assert_eq!(
        record.clicks[0].referrer.as_deref(),
        Some("https://News.Example.org/story/1")
    );
    assert_eq!(record.clicks[0].source_label.as_deref(), Some("news.example.org"));
    assert_eq!(record.clicks[1].referrer, None);
    assert_eq!(record.clicks[1].source_label.as_deref(), Some("bot"));
}

#[tokio::test]
async fn test_create_redirect_then_expire() {
    let app = common::create_test_app();

    let response = app
        .server
        .post("/shorturls")
        .json(&json!({
            "url": "https://example.com/a",
            "validity": 5,
            "shortcode": "abcd"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = app.server.get("/abcd").await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/a");

    let stats: Value = app.server.get("/shorturls/abcd").await.json();
    assert_eq!(stats["clickCount"], 1);

    app.clock.advance(Duration::minutes(5));
    let response = app.server.get("/abcd").await;
    assert_eq!(response.status_code(), StatusCode::GONE);

    let stats: Value = app.server.get("/shorturls/abcd").await.json();
    assert_eq!(stats["clickCount"], 1);
    assert_eq!(stats["expired"], true);
}
