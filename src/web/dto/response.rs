//! Response DTOs for the Web API.

use serde::Serialize;

use crate::auth::{CurrentUser, GuardOutcome};
use crate::datetime::to_rfc3339;
use crate::db::{AttendanceScan, FinancialRecord, User};

/// Generic API response envelope.
///
/// Every successful response carries `success: true` alongside its data,
/// which is what the frontend checks before reading the payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always true.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new success response.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// User information in responses. Never includes the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Role string.
    pub role: String,
    /// Studio locations.
    pub locations: Vec<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last login timestamp.
    pub last_login: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role.to_string(),
            locations: user.locations.clone(),
            created_at: to_rfc3339(&user.created_at),
            last_login: user.last_login.as_deref().map(to_rfc3339),
            is_active: user.is_active,
        }
    }
}

/// The user payload of a session check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Role string.
    pub role: String,
    /// Studio locations.
    pub locations: Vec<String>,
}

impl From<&CurrentUser> for SessionUserInfo {
    fn from(user: &CurrentUser) -> Self {
        SessionUserInfo {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role.to_string(),
            locations: user.locations.clone(),
        }
    }
}

/// Session check response for GET /api/auth/me.
///
/// Anonymous is not an error: the endpoint answers 200 with
/// `success: false` and a null user, and the caller lands in the
/// Anonymous state.
#[derive(Debug, Serialize)]
pub struct SessionCheckResponse {
    /// Whether a valid session resolved.
    pub success: bool,
    /// The session's user, when success.
    pub user: Option<SessionUserInfo>,
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The signed-in user.
    pub user: SessionUserInfo,
}

/// Navigation decision for GET /api/auth/navigate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateResponse {
    /// One of "deferred", "proceed", "toLogin", "toHome", "toUnauthorized".
    pub action: &'static str,
    /// Redirect target when the action navigates.
    pub location: Option<String>,
}

impl From<GuardOutcome> for NavigateResponse {
    fn from(outcome: GuardOutcome) -> Self {
        let location = outcome.location();
        let action = match outcome {
            GuardOutcome::Deferred => "deferred",
            GuardOutcome::Proceed => "proceed",
            GuardOutcome::ToLogin { .. } => "toLogin",
            GuardOutcome::ToHome => "toHome",
            GuardOutcome::ToUnauthorized => "toUnauthorized",
        };
        NavigateResponse { action, location }
    }
}

/// Financial record in responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecordInfo {
    /// Record ID.
    pub id: i64,
    /// "income" or "expense".
    pub record_type: String,
    /// Member name.
    pub member_name: String,
    /// Item.
    pub item: String,
    /// Details.
    pub details: String,
    /// Location.
    pub location: String,
    /// Unit price.
    pub unit_price: f64,
    /// Quantity.
    pub quantity: i64,
    /// Total amount as stored.
    pub total_amount: f64,
    /// Business date.
    pub record_date: String,
    /// Creating username.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<&FinancialRecord> for FinancialRecordInfo {
    fn from(record: &FinancialRecord) -> Self {
        FinancialRecordInfo {
            id: record.id,
            record_type: record.record_type.to_string(),
            member_name: record.member_name.clone(),
            item: record.item.clone(),
            details: record.details.clone(),
            location: record.location.clone(),
            unit_price: record.unit_price,
            quantity: record.quantity,
            total_amount: record.total_amount,
            record_date: to_rfc3339(&record.record_date),
            created_by: record.created_by.clone(),
            created_at: to_rfc3339(&record.created_at),
        }
    }
}

/// One row of recent scan history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanHistoryEntry {
    /// Member display name.
    pub member_name: String,
    /// Scan timestamp.
    pub scan_time: String,
    /// "scan" or "manual".
    pub scan_type: String,
}

impl From<&AttendanceScan> for ScanHistoryEntry {
    fn from(scan: &AttendanceScan) -> Self {
        ScanHistoryEntry {
            member_name: scan.member_name.clone(),
            scan_time: scan.scan_time.clone(),
            scan_type: scan.scan_type.clone(),
        }
    }
}

/// Scan statistics response for GET /api/qr-scan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatsResponse {
    /// All scans for the activity.
    pub total_scans: i64,
    /// Scans today.
    pub today_scans: i64,
    /// Distinct members.
    pub unique_members: i64,
    /// Recent scans, newest first.
    pub scan_history: Vec<ScanHistoryEntry>,
}
