//! Document and eligibility API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::fixtures;
use common::TestContext;

/// Test health check responds.
#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

/// Test the full document is served with ids and metadata.
#[tokio::test]
async fn test_get_document() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/document").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    let kanji: Vec<&str> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kanji"].as_str().unwrap())
        .collect();
    assert_eq!(kanji, vec!["一", "日", "悪", "猫", "亜", "丼"]);
    assert_eq!(body["entries"][5]["id"], 5);
    assert!(body["entries"][5]["jlpt"].is_null());
    assert_eq!(body["source"]["url"], "test://kanjidic");
    assert_eq!(body["filters"]["JLPT"]["field"], "jlpt");
    assert!(body["groups"]["Kanji"]["extra"].is_object());
}

/// Test summary lists modes in order and the document fingerprint.
#[tokio::test]
async fn test_document_summary() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/document/summary").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(body["entry_count"], 6);
    assert_eq!(
        body["modes"],
        json!(["Kanji", "On Reading", "Kun Reading", "Meanings"])
    );
    assert_eq!(body["filters"][0]["name"], "JLPT");
    assert_eq!(body["filters"][0]["values"], json!([4, 3, 2, 1, null]));
    assert_eq!(
        body["fingerprint"],
        fixtures::sample_document().fingerprint().unwrap()
    );
}

/// Test eligibility with selected JLPT levels.
#[tokio::test]
async fn test_eligible_selected_levels() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/eligible")
        .json(&json!({ "selection": fixtures::jlpt_selection(&[4, 3], false) }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["count"], 3);
    assert_eq!(body["ids"], json!([0, 1, 2]));
}

/// Test an empty selection admits every entry.
#[tokio::test]
async fn test_eligible_empty_selection() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.post("/api/eligible").json(&json!({})).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ids"], json!([0, 1, 2, 3, 4, 5]));
}

/// Test the sentinel selects entries without a JLPT level.
#[tokio::test]
async fn test_eligible_other_only() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/eligible")
        .json(&json!({ "selection": fixtures::jlpt_selection(&[], true) }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ids"], json!([5]));
}

/// Test unknown filter names are rejected.
#[tokio::test]
async fn test_eligible_unknown_filter() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/eligible")
        .json(&json!({ "selection": { "Grade": { "1": true } } }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
}
