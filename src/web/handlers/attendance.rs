//! Attendance scan handlers (staff: admin or trainer).

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::auth::require_staff;
use crate::datetime::format_datetime_default;
use crate::db::{AttendanceScan, AttendanceScanRepository, NewAttendanceScan};
use crate::web::dto::{ApiResponse, QrScanRequest, ScanHistoryEntry, ScanStatsResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::SessionUser;

/// How many rows of recent history the stats endpoint returns.
const SCAN_HISTORY_LIMIT: i64 = 10;

/// History entry with the scan time rendered in the studio's timezone,
/// ready for display on the scanner page.
fn history_entry(scan: &AttendanceScan, timezone: &str) -> ScanHistoryEntry {
    let mut entry = ScanHistoryEntry::from(scan);
    entry.scan_time = format_datetime_default(&entry.scan_time, timezone);
    entry
}

/// Client IP from forwarding headers, best effort.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or(s).trim().to_string())
}

/// POST /api/qr-scan - record a check-in.
///
/// The QR payload carries no signature or expiry; the scanner page is
/// the trust boundary, which is why this endpoint is staff-gated.
pub async fn record_scan(
    State(state): State<Arc<AppState>>,
    SessionUser(caller): SessionUser,
    headers: HeaderMap,
    Json(req): Json<QrScanRequest>,
) -> Result<Json<ApiResponse<ScanHistoryEntry>>, ApiError> {
    require_staff(Some(&caller))?;

    if req.activity_id.trim().is_empty() {
        return Err(ApiError::bad_request("Activity ID is required"));
    }
    if req.member_id.trim().is_empty() {
        return Err(ApiError::bad_request("Member ID is required"));
    }
    if req.scan_type != "scan" && req.scan_type != "manual" {
        return Err(ApiError::unprocessable(format!(
            "unknown scan type: {}",
            req.scan_type
        )));
    }

    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let repo = AttendanceScanRepository::new(state.db.pool());
    let scan = repo
        .create(&NewAttendanceScan {
            activity_id: req.activity_id,
            activity_name: req.activity_name,
            member_id: req.member_id,
            member_name: req.member_name,
            scan_type: req.scan_type,
            ip_address: client_ip(&headers),
            user_agent,
        })
        .await
        .map_err(ApiError::from)?;

    tracing::info!(
        activity = %scan.activity_id,
        member = %scan.member_id,
        scan_type = %scan.scan_type,
        "attendance scan recorded"
    );
    Ok(Json(ApiResponse::new(history_entry(&scan, &state.timezone))))
}

/// Query parameters for scan statistics.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatsQuery {
    /// Activity to report on.
    pub activity_id: String,
}

/// GET /api/qr-scan?activityId=... - scan statistics for an activity.
pub async fn scan_stats(
    State(state): State<Arc<AppState>>,
    SessionUser(caller): SessionUser,
    Query(query): Query<ScanStatsQuery>,
) -> Result<Json<ApiResponse<ScanStatsResponse>>, ApiError> {
    require_staff(Some(&caller))?;

    let repo = AttendanceScanRepository::new(state.db.pool());
    let stats = repo
        .stats_for_activity(&query.activity_id)
        .await
        .map_err(ApiError::from)?;
    let recent = repo
        .recent_for_activity(&query.activity_id, SCAN_HISTORY_LIMIT)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::new(ScanStatsResponse {
        total_scans: stats.total_scans,
        today_scans: stats.today_scans,
        unique_members: stats.unique_members,
        scan_history: recent
            .iter()
            .map(|scan| history_entry(scan, &state.timezone))
            .collect(),
    })))
}
