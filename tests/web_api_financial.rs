//! Web API Financial Tests
//!
//! Integration tests for financial records, the period report, and the
//! monthly trend endpoint.

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono_tz::Asia::Hong_Kong;
use serde_json::{json, Value};

use gymdesk::Role;

mod common;
use common::{create_test_server, login, seed_user};

/// Current local datetime in storage format, so seeded records land in
/// the current reporting month.
fn now_local() -> String {
    chrono::Utc::now()
        .with_timezone(&Hong_Kong)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

async fn create_record(
    server: &TestServer,
    record_type: &str,
    member: &str,
    item: &str,
    amount: f64,
) -> Value {
    let response = server
        .post("/api/financial-records")
        .json(&json!({
            "recordType": record_type,
            "memberName": member,
            "item": item,
            "unitPrice": amount,
            "quantity": 1,
            "totalAmount": amount,
            "recordDate": now_local()
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

// ============================================================================
// Access Control Tests
// ============================================================================

#[tokio::test]
async fn test_financial_requires_session() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/api/financial-records").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_financial_requires_admin() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "coach", "password123", Role::Trainer).await;
    login(&server, "coach", "password123").await;

    let response = server.get("/api/financial-records").await;
    response.assert_status(StatusCode::FORBIDDEN);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

// ============================================================================
// Record CRUD Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_list_records() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "boss", "password123", Role::Admin).await;
    login(&server, "boss", "password123").await;

    let body = create_record(&server, "income", "Chan Tai Man", "月費", 500.0).await;
    assert_eq!(body["data"]["recordType"], "income");
    assert_eq!(body["data"]["memberName"], "Chan Tai Man");
    assert_eq!(body["data"]["totalAmount"], 500.0);
    assert_eq!(body["data"]["createdBy"], "boss");

    create_record(&server, "expense", "器材", "啞鈴", 120.0).await;

    let response = server.get("/api/financial-records").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_record_unknown_type() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "boss", "password123", Role::Admin).await;
    login(&server, "boss", "password123").await;

    let response = server
        .post("/api/financial-records")
        .json(&json!({
            "recordType": "transfer",
            "memberName": "Chan Tai Man",
            "item": "月費",
            "totalAmount": 500.0,
            "recordDate": now_local()
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_record_bad_date() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "boss", "password123", Role::Admin).await;
    login(&server, "boss", "password123").await;

    let response = server
        .post("/api/financial-records")
        .json(&json!({
            "recordType": "income",
            "memberName": "Chan Tai Man",
            "item": "月費",
            "totalAmount": 500.0,
            "recordDate": "last tuesday"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_record_empty_member() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "boss", "password123", Role::Admin).await;
    login(&server, "boss", "password123").await;

    let response = server
        .post("/api/financial-records")
        .json(&json!({
            "recordType": "income",
            "memberName": "",
            "item": "月費",
            "totalAmount": 500.0,
            "recordDate": now_local()
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_total_amount_stored_as_entered() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "boss", "password123", Role::Admin).await;
    login(&server, "boss", "password123").await;

    // unitPrice * quantity does not have to equal totalAmount.
    let response = server
        .post("/api/financial-records")
        .json(&json!({
            "recordType": "income",
            "memberName": "Chan Tai Man",
            "item": "私人訓練",
            "unitPrice": 300.0,
            "quantity": 10,
            "totalAmount": 2800.0,
            "recordDate": now_local()
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["totalAmount"], 2800.0);
}

// ============================================================================
// Period Report Tests
// ============================================================================

#[tokio::test]
async fn test_report_this_month_totals() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "boss", "password123", Role::Admin).await;
    login(&server, "boss", "password123").await;

    create_record(&server, "income", "Chan Tai Man", "月費", 500.0).await;
    create_record(&server, "income", "Wong Siu Ming", "私人訓練", 300.0).await;
    create_record(&server, "expense", "器材", "啞鈴", 200.0).await;

    let response = server
        .get("/api/financial-records/report")
        .add_query_param("period", "本月")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let report = &body["data"];
    assert_eq!(report["period"], "本月");
    assert_eq!(report["totalIncome"], 800.0);
    assert_eq!(report["totalExpense"], 200.0);
    assert_eq!(report["net"], 600.0);
    assert_eq!(report["recordCount"], 3);

    // Rankings sum both income and expense and sort by total.
    let members = report["topMembers"].as_array().unwrap();
    assert_eq!(members[0]["name"], "Chan Tai Man");
    assert_eq!(members[0]["totalAmount"], 500.0);
}

#[tokio::test]
async fn test_report_unknown_period_defaults_to_this_month() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "boss", "password123", Role::Admin).await;
    login(&server, "boss", "password123").await;

    let response = server
        .get("/api/financial-records/report")
        .add_query_param("period", "whenever")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["period"], "本月");
}

#[tokio::test]
async fn test_report_last_month_excludes_current_records() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "boss", "password123", Role::Admin).await;
    login(&server, "boss", "password123").await;

    create_record(&server, "income", "Chan Tai Man", "月費", 500.0).await;

    let response = server
        .get("/api/financial-records/report")
        .add_query_param("period", "上月")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["totalIncome"], 0.0);
    assert_eq!(body["data"]["recordCount"], 0);
}

// ============================================================================
// Monthly Trend Tests
// ============================================================================

#[tokio::test]
async fn test_monthly_trend_shape_and_totals() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "boss", "password123", Role::Admin).await;
    login(&server, "boss", "password123").await;

    create_record(&server, "income", "Chan Tai Man", "月費", 500.0).await;
    create_record(&server, "expense", "器材", "啞鈴", 100.0).await;

    let response = server.get("/api/financial-records/monthly-trend").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let trend = body["data"]["trendData"].as_array().unwrap();
    assert_eq!(trend.len(), 12);

    // All records fall in the newest bucket.
    let last = &trend[11];
    assert_eq!(last["income"], 500.0);
    assert_eq!(last["expense"], 100.0);
    assert_eq!(last["net"], 400.0);
    assert_eq!(last["recordCount"], 2);

    // A month following eleven empty months reports a 0% change.
    assert_eq!(last["incomeChange"], 0.0);

    let summary = &body["data"]["summary"];
    assert_eq!(summary["totalIncome"], 500.0);
    assert_eq!(summary["totalRecords"], 2);
    assert_eq!(summary["maxIncomeMonth"]["amount"], 500.0);
}

#[tokio::test]
async fn test_monthly_trend_requires_admin() {
    let (server, db) = create_test_server().await;
    seed_user(&db, "coach", "password123", Role::Trainer).await;
    login(&server, "coach", "password123").await;

    let response = server.get("/api/financial-records/monthly-trend").await;
    response.assert_status(StatusCode::FORBIDDEN);
}
