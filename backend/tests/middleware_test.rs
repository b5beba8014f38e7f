//! Middleware pipeline tests over the full router
//!
//! None of these require a database: rejections happen before any handler
//! runs, and the refresh flow only touches the in-memory token store.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use storefront_shared::models::{ADMIN_ROLE, USER_ROLE};
use storefront_shared::types::TokenPair;
use tower::ServiceExt;

#[tokio::test]
async fn protected_route_without_header_is_bad_request() {
    let app = common::TestApp::new();

    let (status, body) = app
        .get(&format!("/users/{}/10", uuid::Uuid::new_v4()))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("missing"));
}

#[tokio::test]
async fn protected_route_with_wrong_scheme_is_bad_request() {
    let app = common::TestApp::new();

    let request = Request::builder()
        .uri(format!("/users/{}", uuid::Uuid::new_v4()))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_route_with_garbage_token_is_unauthorized() {
    let app = common::TestApp::new();

    let (status, _) = app
        .get_auth(&format!("/users/{}", uuid::Uuid::new_v4()), "not.a.token")
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_access_token_is_unauthorized_with_expiry_message() {
    let app = common::TestApp::new();

    // Same salt as the app, but already-expired lifetimes
    let expired =
        storefront_backend::auth::TokenCodec::new(&app.state.config().jwt.salt, -60, -60);
    let pair = expired.issue_pair("u1", &[ADMIN_ROLE.to_string()]).unwrap();

    let (status, body) = app
        .get_auth(
            &format!("/users/{}", uuid::Uuid::new_v4()),
            &pair.access_token,
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("expired"));
}

#[tokio::test]
async fn user_role_cannot_reach_admin_route() {
    let app = common::TestApp::new();
    let pair = app
        .state
        .jwt()
        .issue_pair("u1", &[USER_ROLE.to_string()])
        .unwrap();

    let (status, body) = app
        .get_auth(
            &format!("/users/{}", uuid::Uuid::new_v4()),
            &pair.access_token,
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("not authorized"));
}

#[tokio::test]
async fn admin_token_passes_the_auth_pipeline() {
    let app = common::TestApp::new();
    let pair = app
        .state
        .jwt()
        .issue_pair("u1", &[ADMIN_ROLE.to_string()])
        .unwrap();

    let (status, _) = app
        .get_auth(
            &format!("/users/{}", uuid::Uuid::new_v4()),
            &pair.access_token,
        )
        .await;

    // The handler then fails on the lazy database pool, but the
    // middleware must have let the request through.
    assert_ne!(status, StatusCode::UNAUTHORIZED);
    assert_ne!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn public_product_reads_need_no_token() {
    let app = common::TestApp::new();

    let (status, _) = app
        .get(&format!("/products/{}", uuid::Uuid::new_v4()))
        .await;

    // No auth rejection; the lazy pool fails afterwards
    assert_ne!(status, StatusCode::UNAUTHORIZED);
    assert_ne!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn refresh_with_a_valid_pair_returns_a_fresh_pair() {
    let app = common::TestApp::new();
    let issued = app
        .state
        .jwt()
        .issue_pair("u1", &[USER_ROLE.to_string()])
        .unwrap();

    let body = json!({
        "access_token": issued.access_token,
        "refresh_token": issued.refresh_token,
    });

    let (status, response) = app.post("/auth/refresh", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);

    let fresh: TokenPair = serde_json::from_str(&response).unwrap();
    assert!(!fresh.access_token.is_empty());
    assert!(!fresh.refresh_token.is_empty());
    assert_ne!(fresh.access_token, issued.access_token);
    assert_ne!(fresh.refresh_token, issued.refresh_token);

    // Exactly one record for the user after the rotation
    assert_eq!(app.tokens.len(), 1);
    assert!(app.tokens.get("u1").is_some());
}

#[tokio::test]
async fn refresh_with_a_mixed_pair_is_unauthorized() {
    let app = common::TestApp::new();
    let first = app
        .state
        .jwt()
        .issue_pair("u1", &[USER_ROLE.to_string()])
        .unwrap();
    let second = app
        .state
        .jwt()
        .issue_pair("u1", &[USER_ROLE.to_string()])
        .unwrap();

    let body = json!({
        "access_token": first.access_token,
        "refresh_token": second.refresh_token,
    });

    let (status, response) = app.post("/auth/refresh", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(response.contains("not bound"));
}

#[tokio::test]
async fn refresh_with_garbage_tokens_is_unauthorized() {
    let app = common::TestApp::new();

    let body = json!({
        "access_token": "abc",
        "refresh_token": "def",
    });

    let (status, _) = app.post("/auth/refresh", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn status_endpoint_is_public() {
    let app = common::TestApp::new();

    let (status, body) = app.get("/status").await;

    // Healthy or degraded depending on the environment, never an auth error
    assert_ne!(status, StatusCode::UNAUTHORIZED);
    assert_ne!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("database"));
}
