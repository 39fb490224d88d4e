//! Attendance scan model and repository.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::{GymDeskError, Result};

/// A recorded attendance check-in.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendanceScan {
    /// Scan ID.
    pub id: i64,
    /// Activity (class/session) identifier.
    pub activity_id: String,
    /// Activity display name.
    pub activity_name: String,
    /// Member identifier from the scanned code.
    pub member_id: String,
    /// Member display name.
    pub member_name: String,
    /// Scan timestamp (UTC text).
    pub scan_time: String,
    /// "scan" for QR check-ins, "manual" for front-desk entry.
    pub scan_type: String,
    /// Client IP, when known.
    pub ip_address: Option<String>,
    /// Client user agent, when known.
    pub user_agent: Option<String>,
}

/// Data for recording a check-in.
#[derive(Debug, Clone)]
pub struct NewAttendanceScan {
    /// Activity identifier.
    pub activity_id: String,
    /// Activity display name.
    pub activity_name: String,
    /// Member identifier.
    pub member_id: String,
    /// Member display name.
    pub member_name: String,
    /// "scan" or "manual".
    pub scan_type: String,
    /// Client IP.
    pub ip_address: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
}

/// Aggregate check-in statistics for an activity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    /// All check-ins recorded for the activity.
    pub total_scans: i64,
    /// Check-ins recorded today (UTC).
    pub today_scans: i64,
    /// Distinct members seen.
    pub unique_members: i64,
}

/// Repository for attendance scan operations.
pub struct AttendanceScanRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AttendanceScanRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a check-in, returning the stored row.
    pub async fn create(&self, new_scan: &NewAttendanceScan) -> Result<AttendanceScan> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO attendance_scans
                (activity_id, activity_name, member_id, member_name,
                 scan_type, ip_address, user_agent)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&new_scan.activity_id)
        .bind(&new_scan.activity_name)
        .bind(&new_scan.member_id)
        .bind(&new_scan.member_name)
        .bind(&new_scan.scan_type)
        .bind(&new_scan.ip_address)
        .bind(&new_scan.user_agent)
        .fetch_one(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| GymDeskError::NotFound("attendance scan".into()))
    }

    /// Get a scan by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<AttendanceScan>> {
        let scan =
            sqlx::query_as::<_, AttendanceScan>("SELECT * FROM attendance_scans WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool)
                .await
                .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(scan)
    }

    /// Recent check-ins for an activity, newest first.
    pub async fn recent_for_activity(
        &self,
        activity_id: &str,
        limit: i64,
    ) -> Result<Vec<AttendanceScan>> {
        let scans = sqlx::query_as::<_, AttendanceScan>(
            "SELECT * FROM attendance_scans
             WHERE activity_id = ?
             ORDER BY scan_time DESC, id DESC
             LIMIT ?",
        )
        .bind(activity_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(scans)
    }

    /// Whether the member already checked in to the activity today (UTC).
    pub async fn has_scanned_today(&self, activity_id: &str, member_id: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM attendance_scans
             WHERE activity_id = ? AND member_id = ?
               AND date(scan_time) = date('now')",
        )
        .bind(activity_id)
        .bind(member_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    /// Aggregate statistics for an activity.
    pub async fn stats_for_activity(&self, activity_id: &str) -> Result<ScanStats> {
        let (total_scans, today_scans, unique_members): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*),
                    COUNT(CASE WHEN date(scan_time) = date('now') THEN 1 END),
                    COUNT(DISTINCT member_id)
             FROM attendance_scans
             WHERE activity_id = ?",
        )
        .bind(activity_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(ScanStats {
            total_scans,
            today_scans,
            unique_members,
        })
    }
}
