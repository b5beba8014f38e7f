//! Integration tests for authentication endpoints
//!
//! These drive the full sign-up/sign-in/sign-out/refresh lifecycle against
//! a real database (TEST_DATABASE_URL).

mod common;

use axum::http::StatusCode;
use serde_json::json;
use storefront_shared::types::TokenPair;

fn signup_body(username: &str, password: &str, roles: &[&str]) -> String {
    json!({
        "username": username,
        "first_name": "Alan",
        "last_name": "Turing",
        "email": format!("{}@example.com", username),
        "password": password,
        "password_confirm": password,
        "roles": roles,
    })
    .to_string()
}

fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore = "requires database"]
async fn signup_creates_a_user_without_echoing_the_password() {
    let app = common::TestApp::with_database().await;
    let username = unique_username("signup");

    let (status, response) = app
        .post("/auth/signup", &signup_body(&username, "secret123", &["user"]))
        .await;

    assert_eq!(status, StatusCode::CREATED);

    let body: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(body["username"], username.as_str());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
    assert!(!response.to_lowercase().contains("password"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn signup_with_taken_username_is_a_conflict() {
    let app = common::TestApp::with_database().await;
    let username = unique_username("dup");
    let body = signup_body(&username, "secret123", &["user"]);

    let (status, _) = app.post("/auth/signup", &body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.post("/auth/signup", &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn signup_with_mismatched_confirmation_is_rejected() {
    let app = common::TestApp::with_database().await;

    let body = json!({
        "username": unique_username("mismatch"),
        "email": "m@example.com",
        "password": "secret123",
        "password_confirm": "secret124",
        "roles": ["user"],
    })
    .to_string();

    let (status, response) = app.post("/auth/signup", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response.contains("fields"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn signin_returns_a_distinct_token_pair() {
    let app = common::TestApp::with_database().await;
    let username = unique_username("signin");
    app.post("/auth/signup", &signup_body(&username, "secret123", &["user"]))
        .await;

    let body = json!({ "username": username, "password": "secret123" });
    let (status, response) = app.post("/auth/signin", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);

    let pair: TokenPair = serde_json::from_str(&response).unwrap();
    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_ne!(pair.access_token, pair.refresh_token);
}

#[tokio::test]
#[ignore = "requires database"]
async fn signin_with_wrong_password_is_unauthorized() {
    let app = common::TestApp::with_database().await;
    let username = unique_username("wrongpw");
    app.post("/auth/signup", &signup_body(&username, "secret123", &["user"]))
        .await;

    let body = json!({ "username": username, "password": "secret124" });
    let (status, response) = app.post("/auth/signin", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(response.contains("invalid credentials"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn signin_with_unknown_user_is_not_found() {
    let app = common::TestApp::with_database().await;

    let body = json!({ "username": "no_such_user", "password": "whatever" });
    let (status, _) = app.post("/auth/signin", &body.to_string()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn repeated_signin_keeps_a_single_session_record() {
    let app = common::TestApp::with_database().await;
    let username = unique_username("single");
    app.post("/auth/signup", &signup_body(&username, "secret123", &["user"]))
        .await;

    let body = json!({ "username": username, "password": "secret123" }).to_string();
    for _ in 0..3 {
        let (status, _) = app.post("/auth/signin", &body).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(app.tokens.len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn signout_deletes_the_session_and_is_idempotent() {
    let app = common::TestApp::with_database().await;
    let username = unique_username("signout");
    app.post("/auth/signup", &signup_body(&username, "secret123", &["user"]))
        .await;

    let credentials = json!({ "username": username, "password": "secret123" }).to_string();
    app.post("/auth/signin", &credentials).await;
    assert_eq!(app.tokens.len(), 1);

    let (status, _) = app.post("/auth/signout", &credentials).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.tokens.len(), 0);

    // Signing out with no session left behaves the same
    let (status, _) = app.post("/auth/signout", &credentials).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn signout_with_wrong_password_keeps_the_session() {
    let app = common::TestApp::with_database().await;
    let username = unique_username("keepalive");
    app.post("/auth/signup", &signup_body(&username, "secret123", &["user"]))
        .await;
    app.post(
        "/auth/signin",
        &json!({ "username": username, "password": "secret123" }).to_string(),
    )
    .await;

    let bad = json!({ "username": username, "password": "secret124" }).to_string();
    let (status, _) = app.post("/auth/signout", &bad).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.tokens.len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn signed_in_pair_can_be_refreshed() {
    let app = common::TestApp::with_database().await;
    let username = unique_username("refresh");
    app.post("/auth/signup", &signup_body(&username, "secret123", &["user"]))
        .await;

    let (_, response) = app
        .post(
            "/auth/signin",
            &json!({ "username": username, "password": "secret123" }).to_string(),
        )
        .await;
    let pair: TokenPair = serde_json::from_str(&response).unwrap();

    let (status, response) = app
        .post(
            "/auth/refresh",
            &json!({
                "access_token": pair.access_token,
                "refresh_token": pair.refresh_token,
            })
            .to_string(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);

    let fresh: TokenPair = serde_json::from_str(&response).unwrap();
    assert_ne!(fresh.refresh_token, pair.refresh_token);
    assert_eq!(app.tokens.len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn admin_can_list_users_with_a_signed_in_token() {
    let app = common::TestApp::with_database().await;
    let username = unique_username("admin");
    app.post("/auth/signup", &signup_body(&username, "secret123", &["admin"]))
        .await;

    let (_, response) = app
        .post(
            "/auth/signin",
            &json!({ "username": username, "password": "secret123" }).to_string(),
        )
        .await;
    let pair: TokenPair = serde_json::from_str(&response).unwrap();

    // Walk from the max uuid to get the first page
    let (status, response) = app
        .get_auth(
            "/users/ffffffff-ffff-ffff-ffff-ffffffffffff/10",
            &pair.access_token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(response.contains(&username));
}
