//! Financial record and reporting handlers (admin only).

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::auth::require_admin;
use crate::datetime::parse_db_datetime;
use crate::db::{FinancialRecordRepository, NewFinancialRecord, RecordType};
use crate::report::{monthly_trend, summarize, PeriodReport, ReportPeriod, TrendReport};
use crate::web::dto::{ApiResponse, CreateFinancialRecordRequest, FinancialRecordInfo};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::SessionUser;

/// GET /api/financial-records - the full record list, newest first.
///
/// The report page fetches everything and filters client-side; the
/// reporting endpoints below do the same filtering server-side.
pub async fn list_financial_records(
    State(state): State<Arc<AppState>>,
    SessionUser(caller): SessionUser,
) -> Result<Json<ApiResponse<Vec<FinancialRecordInfo>>>, ApiError> {
    require_admin(Some(&caller))?;

    let repo = FinancialRecordRepository::new(state.db.pool());
    let records = repo.list().await.map_err(ApiError::from)?;
    let infos = records.iter().map(FinancialRecordInfo::from).collect();
    Ok(Json(ApiResponse::new(infos)))
}

/// POST /api/financial-records - create a record.
pub async fn create_financial_record(
    State(state): State<Arc<AppState>>,
    SessionUser(caller): SessionUser,
    Json(req): Json<CreateFinancialRecordRequest>,
) -> Result<Json<ApiResponse<FinancialRecordInfo>>, ApiError> {
    require_admin(Some(&caller))?;

    let record_type = RecordType::from_str(&req.record_type)
        .map_err(|e| ApiError::unprocessable(e))?;

    if req.member_name.trim().is_empty() {
        return Err(ApiError::bad_request("Member name is required"));
    }
    if req.item.trim().is_empty() {
        return Err(ApiError::bad_request("Item is required"));
    }
    // Normalized so stored dates are uniform regardless of input form
    let record_date = parse_db_datetime(&req.record_date)
        .ok_or_else(|| {
            ApiError::unprocessable(format!("unparseable record date: {}", req.record_date))
        })?
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    // total_amount is deliberately NOT checked against unit_price *
    // quantity; it is stored exactly as entered.

    let repo = FinancialRecordRepository::new(state.db.pool());
    let record = repo
        .create(&NewFinancialRecord {
            record_type,
            member_name: req.member_name,
            item: req.item,
            details: req.details,
            location: req.location,
            unit_price: req.unit_price,
            quantity: req.quantity,
            total_amount: req.total_amount,
            record_date,
            created_by: caller.username.clone(),
        })
        .await
        .map_err(ApiError::from)?;

    tracing::info!(
        record_id = record.id,
        record_type = %record.record_type,
        amount = record.total_amount,
        "financial record created"
    );
    Ok(Json(ApiResponse::new(FinancialRecordInfo::from(&record))))
}

/// Query parameters for the period report.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Period label; unknown labels fall back to the current month.
    #[serde(default)]
    pub period: Option<String>,
}

/// GET /api/financial-records/report?period=... - period summary.
pub async fn financial_report(
    State(state): State<Arc<AppState>>,
    SessionUser(caller): SessionUser,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ApiResponse<PeriodReport>>, ApiError> {
    require_admin(Some(&caller))?;

    let period = query
        .period
        .as_deref()
        .map(ReportPeriod::from_label)
        .unwrap_or_default();

    let repo = FinancialRecordRepository::new(state.db.pool());
    let records = repo.list().await.map_err(ApiError::from)?;
    let report = summarize(&records, period, state.now());
    Ok(Json(ApiResponse::new(report)))
}

/// GET /api/financial-records/monthly-trend - trailing 12-month series.
pub async fn financial_monthly_trend(
    State(state): State<Arc<AppState>>,
    SessionUser(caller): SessionUser,
) -> Result<Json<ApiResponse<TrendReport>>, ApiError> {
    require_admin(Some(&caller))?;

    let repo = FinancialRecordRepository::new(state.db.pool());
    let records = repo.list().await.map_err(ApiError::from)?;
    let report = monthly_trend(&records, state.now());
    Ok(Json(ApiResponse::new(report)))
}
