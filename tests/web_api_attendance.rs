//! Web API Attendance Tests
//!
//! Integration tests for QR scan recording and activity statistics.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use gymdesk::Role;

mod common;
use common::{create_test_server, login, seed_user};

async fn record_scan(server: &TestServer, activity: &str, member: &str) -> Value {
    let response = server
        .post("/api/qr-scan")
        .json(&json!({
            "activityId": activity,
            "activityName": "Morning Yoga",
            "memberId": member,
            "memberName": format!("Member {member}")
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

// ============================================================================
// Access Control Tests
// ============================================================================

#[tokio::test]
async fn test_scan_requires_session() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/qr-scan")
        .json(&json!({
            "activityId": "yoga-0800",
            "memberId": "M-001"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_scan_denied_for_member() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "chan", "password123", Role::Member).await;
    login(&server, "chan", "password123").await;

    let response = server
        .post("/api/qr-scan")
        .json(&json!({
            "activityId": "yoga-0800",
            "memberId": "M-001"
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_scan_allowed_for_trainer() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "coach", "password123", Role::Trainer).await;
    login(&server, "coach", "password123").await;

    let body = record_scan(&server, "yoga-0800", "M-001").await;
    assert_eq!(body["data"]["memberName"], "Member M-001");
    assert_eq!(body["data"]["scanType"], "scan");
}

// ============================================================================
// Recording Tests
// ============================================================================

#[tokio::test]
async fn test_scan_missing_activity() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "coach", "password123", Role::Trainer).await;
    login(&server, "coach", "password123").await;

    let response = server
        .post("/api/qr-scan")
        .json(&json!({
            "activityId": "",
            "memberId": "M-001"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scan_unknown_type() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "coach", "password123", Role::Trainer).await;
    login(&server, "coach", "password123").await;

    let response = server
        .post("/api/qr-scan")
        .json(&json!({
            "activityId": "yoga-0800",
            "memberId": "M-001",
            "scanType": "telepathy"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_manual_scan_type() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "coach", "password123", Role::Trainer).await;
    login(&server, "coach", "password123").await;

    let response = server
        .post("/api/qr-scan")
        .json(&json!({
            "activityId": "yoga-0800",
            "memberId": "M-001",
            "memberName": "Chan Tai Man",
            "scanType": "manual"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["scanType"], "manual");
}

// ============================================================================
// Statistics Tests
// ============================================================================

#[tokio::test]
async fn test_scan_stats() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "coach", "password123", Role::Trainer).await;
    login(&server, "coach", "password123").await;

    record_scan(&server, "yoga-0800", "M-001").await;
    record_scan(&server, "yoga-0800", "M-001").await;
    record_scan(&server, "yoga-0800", "M-002").await;
    record_scan(&server, "spin-1900", "M-003").await;

    let response = server
        .get("/api/qr-scan")
        .add_query_param("activityId", "yoga-0800")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let stats = &body["data"];
    assert_eq!(stats["totalScans"], 3);
    assert_eq!(stats["todayScans"], 3);
    assert_eq!(stats["uniqueMembers"], 2);
    assert_eq!(stats["scanHistory"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_scan_stats_empty_activity() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "boss", "password123", Role::Admin).await;
    login(&server, "boss", "password123").await;

    let response = server
        .get("/api/qr-scan")
        .add_query_param("activityId", "nothing-here")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["totalScans"], 0);
    assert_eq!(body["data"]["scanHistory"].as_array().unwrap().len(), 0);
}
