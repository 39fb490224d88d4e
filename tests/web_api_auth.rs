//! Web API Authentication Tests
//!
//! Integration tests for the session endpoints and the navigation guard.

use axum::http::StatusCode;
use serde_json::{json, Value};

use gymdesk::{Role, UserRepository, UserUpdate};

mod common;
use common::{create_test_server, login, seed_user};

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_success_sets_session() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "alice", "password123", Role::Admin).await;

    let body = login(&server, "alice", "password123").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["username"], "alice");
    assert_eq!(body["data"]["user"]["role"], "admin");

    // The saved cookie authenticates the session check.
    let response = server.get("/api/auth/me").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "alice");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "alice", "password123", Role::Member).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": "alice",
            "password": "wrongpassword"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(body["error"]["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_unknown_user_same_message() {
    let (server, _db) = create_test_server().await;

    // An unknown username must not be distinguishable from a bad password.
    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": "nobody",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_inactive_account() {
    let (server, db) = create_test_server().await;
    let id = seed_user(&db, "alice", "password123", Role::Member).await;

    let repo = UserRepository::new(db.pool());
    repo.update(id, &UserUpdate::new().is_active(false))
        .await
        .unwrap();

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": "alice",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_login_empty_credentials() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": "",
            "password": ""
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Session Check Tests
// ============================================================================

#[tokio::test]
async fn test_me_anonymous_is_soft_failure() {
    let (server, _db) = create_test_server().await;

    // No cookie: still HTTP 200, with success:false and a null user.
    let response = server.get("/api/auth/me").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["user"].is_null());
}

#[tokio::test]
async fn test_me_with_garbage_cookie() {
    let (server, _db) = create_test_server().await;

    let response = server
        .get("/api/auth/me")
        .add_header(
            axum::http::header::COOKIE,
            "gymdesk_session=not-a-real-token",
        )
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
async fn test_logout_ends_session() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "alice", "password123", Role::Member).await;
    login(&server, "alice", "password123").await;

    let response = server.post("/api/auth/logout").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    // The session no longer resolves.
    let response = server.get("/api/auth/me").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let (server, _db) = create_test_server().await;

    let response = server.post("/api/auth/logout").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
}

// ============================================================================
// Navigation Guard Tests
// ============================================================================

async fn navigate(server: &axum_test::TestServer, path: &str) -> Value {
    let response = server
        .get("/api/auth/navigate")
        .add_query_param("path", path)
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

#[tokio::test]
async fn test_navigate_anonymous_to_protected_redirects_to_login() {
    let (server, _db) = create_test_server().await;

    let body = navigate(&server, "/financial_management/report").await;
    assert_eq!(body["data"]["action"], "toLogin");
    assert_eq!(
        body["data"]["location"],
        "/login?redirect=%2Ffinancial_management%2Freport"
    );
}

#[tokio::test]
async fn test_navigate_anonymous_to_root() {
    let (server, _db) = create_test_server().await;

    let body = navigate(&server, "/").await;
    assert_eq!(body["data"]["action"], "toLogin");
    assert_eq!(body["data"]["location"], "/login?redirect=%2F");
}

#[tokio::test]
async fn test_navigate_anonymous_to_public_proceeds() {
    let (server, _db) = create_test_server().await;

    let body = navigate(&server, "/login").await;
    assert_eq!(body["data"]["action"], "proceed");
    assert!(body["data"]["location"].is_null());
}

#[tokio::test]
async fn test_navigate_authenticated_on_login_goes_home() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "alice", "password123", Role::Member).await;
    login(&server, "alice", "password123").await;

    let body = navigate(&server, "/login").await;
    assert_eq!(body["data"]["action"], "toHome");
    assert_eq!(body["data"]["location"], "/");
}

#[tokio::test]
async fn test_navigate_trainer_denied_account_management() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "coach", "password123", Role::Trainer).await;
    login(&server, "coach", "password123").await;

    let body = navigate(&server, "/account_management").await;
    assert_eq!(body["data"]["action"], "toUnauthorized");
    assert_eq!(body["data"]["location"], "/unauthorized");
}

#[tokio::test]
async fn test_navigate_trainer_allowed_attendance() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "coach", "password123", Role::Trainer).await;
    login(&server, "coach", "password123").await;

    let body = navigate(&server, "/attendance").await;
    assert_eq!(body["data"]["action"], "proceed");
}

#[tokio::test]
async fn test_navigate_admin_allowed_everywhere() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "boss", "password123", Role::Admin).await;
    login(&server, "boss", "password123").await;

    for path in [
        "/",
        "/attendance",
        "/account_management",
        "/admin",
        "/financial_management",
    ] {
        let body = navigate(&server, path).await;
        assert_eq!(body["data"]["action"], "proceed", "path {path}");
    }
}

#[tokio::test]
async fn test_navigate_unclassified_path_proceeds_for_anyone() {
    let (server, _db) = create_test_server().await;

    let body = navigate(&server, "/about").await;
    assert_eq!(body["data"]["action"], "proceed");
}
