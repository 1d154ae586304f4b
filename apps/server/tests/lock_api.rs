//! End-to-end tests for the lock endpoints.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use ipdesk_server::api::app_router;
use ipdesk_server::config::Config;
use ipdesk_server::build_state;

async fn build_test_router() -> (axum::Router, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config {
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        // Unreachable on purpose; these tests never call the platforms.
        signature_platform_url: "http://127.0.0.1:1".to_string(),
        payment_gateway_url: "http://127.0.0.1:1".to_string(),
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state), tmp)
}

fn json_request(method: Method, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user) = user {
        builder = builder.header("X-User", user);
    }
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_draft(app: &axum::Router, number: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/applications",
            None,
            Some(json!({
                "number": number,
                "ipRightType": "TRADEMARK",
                "kind": "REGISTRATION",
                "accountId": "acct-1",
                "title": "Word mark",
                "applicantName": "ACME Oy",
                "payload": null
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test(flavor = "multi_thread")]
async fn lock_conflict_surfaces_the_holder() {
    let (app, _tmp) = build_test_router().await;
    let id = create_draft(&app, "40000001").await;

    // bob locks the draft.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/applications/TRADEMARK/{id}/lock"),
            Some("bob"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["lockedBy"], "bob");
    assert!(body["lockedDate"].is_string());

    // carol gets 423 LOCKED with bob's identity in the body.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/applications/TRADEMARK/{id}/lock"),
            Some("carol"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::LOCKED);
    let body = response_json(response).await;
    assert_eq!(body["error"], "locked");
    assert_eq!(body["heldBy"], "bob");

    // carol cannot unlock either.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/applications/TRADEMARK/{id}/unlock"),
            Some("carol"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::LOCKED);

    // bob unlocks; both fields are cleared in the response.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/applications/TRADEMARK/{id}/unlock"),
            Some("BOB"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["lockedBy"].is_null());
    assert!(body["lockedDate"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_actor_header_is_a_bad_request() {
    let (app, _tmp) = build_test_router().await;
    let id = create_draft(&app, "40000002").await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/applications/TRADEMARK/{id}/lock"),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_id_and_wrong_type_segment_are_not_found() {
    let (app, _tmp) = build_test_router().await;
    let id = create_draft(&app, "40000003").await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::GET,
            "/api/v1/applications/TRADEMARK/no-such-id",
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The record exists but under another IP right type.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::GET,
            &format!("/api/v1/applications/DESIGN/{id}"),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // An unknown type segment is a validation error, not a 404.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::GET,
            &format!("/api/v1/applications/PATENT/{id}"),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn bulk_lock_is_all_or_nothing_over_http() {
    let (app, _tmp) = build_test_router().await;
    let first = create_draft(&app, "40000004").await;
    let _second = create_draft(&app, "40000004").await;

    // dave locks one row of the filing.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/applications/TRADEMARK/{first}/lock"),
            Some("dave"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // erin's bulk lock fails with dave's identity.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/applications/number/40000004/lock",
            Some("erin"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::LOCKED);
    let body = response_json(response).await;
    assert_eq!(body["heldBy"], "dave");

    // After dave releases, the bulk lock covers both rows.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/applications/number/40000004/unlock",
            Some("dave"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/applications/number/40000004/lock",
            Some("erin"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .all(|row| row["lockedBy"] == "erin"));
}

#[tokio::test(flavor = "multi_thread")]
async fn search_returns_paginated_results() {
    let (app, _tmp) = build_test_router().await;
    create_draft(&app, "40000005").await;
    create_draft(&app, "40000006").await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/applications/search",
            None,
            Some(json!({
                "page": 0,
                "pageSize": 1,
                "statusFilter": ["DRAFT"]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["meta"]["totalRowCount"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
