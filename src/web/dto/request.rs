//! Request DTOs for the Web API.
//!
//! Field names are camelCase on the wire, matching the frontend's
//! existing fetch calls.

use serde::Deserialize;

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Create user request (account management).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Username.
    pub username: String,
    /// Plain-text password, hashed before storage.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Role string, validated against the closed role set.
    #[serde(default)]
    pub role: Option<String>,
    /// Studio locations.
    #[serde(default)]
    pub locations: Vec<String>,
}

/// Partial user update request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// New plain-text password.
    pub password: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New role string.
    pub role: Option<String>,
    /// New locations list.
    pub locations: Option<Vec<String>>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Create financial record request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFinancialRecordRequest {
    /// "income" or "expense".
    pub record_type: String,
    /// Member name.
    pub member_name: String,
    /// Item.
    pub item: String,
    /// Free-form details.
    #[serde(default)]
    pub details: String,
    /// Studio location.
    #[serde(default)]
    pub location: String,
    /// Unit price.
    #[serde(default)]
    pub unit_price: f64,
    /// Quantity.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    /// Total amount, stored as entered.
    pub total_amount: f64,
    /// Business date, "YYYY-MM-DD HH:MM:SS" or RFC 3339.
    pub record_date: String,
}

fn default_quantity() -> i64 {
    1
}

/// QR scan recording request, as posted by the scanner page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrScanRequest {
    /// Activity being checked into.
    pub activity_id: String,
    /// Activity display name.
    #[serde(default)]
    pub activity_name: String,
    /// Member identifier from the scanned code.
    pub member_id: String,
    /// Member display name.
    #[serde(default)]
    pub member_name: String,
    /// "scan" or "manual"; defaults to "scan".
    #[serde(default = "default_scan_type")]
    pub scan_type: String,
}

fn default_scan_type() -> String {
    "scan".to_string()
}
