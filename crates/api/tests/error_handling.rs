//! Error shape and middleware behaviour across the router.

mod common;

use std::sync::atomic::Ordering;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get, post_form, send, InMemoryStore};

#[tokio::test]
async fn storage_failure_on_search_is_generic_500() {
    let store = InMemoryStore::with_logs(5);
    store.fail.store(true, Ordering::SeqCst);
    let app = build_test_app(store.clone());

    let response = get(app, "/admin/api/mail/list").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
    assert_eq!(store.find_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn storage_failure_on_send_is_generic_500() {
    let store = InMemoryStore::new();
    store.fail.store(true, Ordering::SeqCst);
    let app = build_test_app(store.clone());

    let form = [
        ("toAddress", "a@example.com"),
        ("replyTo", "b@example.com"),
        ("subject", "Hi"),
        ("body", "Hello"),
    ];
    let response = post_form(app, "/admin/api/mail/send", &form).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("pool"));
    assert_eq!(store.insert_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = build_test_app(InMemoryStore::new());

    let response = get(app, "/admin/api/mail/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_log_id_is_rejected() {
    let app = build_test_app(InMemoryStore::new());

    let response = get(app, "/admin/api/mail/logs/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = build_test_app(InMemoryStore::new());

    let response = get(app, "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn cors_preflight_does_not_offer_authorization() {
    let app = build_test_app(InMemoryStore::new());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/admin/api/mail/send")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    let headers = response.headers();
    let allowed = headers
        .get("access-control-allow-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(allowed.contains("content-type"));
    assert!(!allowed.contains("authorization"));
    assert!(headers.get("access-control-allow-credentials").is_none());
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
}
