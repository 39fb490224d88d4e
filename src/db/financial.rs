//! Financial record model and repository.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::{GymDeskError, Result};

/// Whether a record is money in or money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    /// Income (membership fees, class packages, merchandise).
    Income,
    /// Expense (rent, equipment, payroll).
    Expense,
}

impl RecordType {
    /// Database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Income => "income",
            RecordType::Expense => "expense",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(RecordType::Income),
            "expense" => Ok(RecordType::Expense),
            _ => Err(format!("unknown record type: {s}")),
        }
    }
}

/// A single financial record.
///
/// `total_amount` is taken as entered; it is not reconciled against
/// `unit_price * quantity` anywhere in the system.
#[derive(Debug, Clone)]
pub struct FinancialRecord {
    /// Record ID.
    pub id: i64,
    /// Income or expense.
    pub record_type: RecordType,
    /// Member the record is attributed to.
    pub member_name: String,
    /// Item sold or purchased.
    pub item: String,
    /// Free-form details.
    pub details: String,
    /// Studio location.
    pub location: String,
    /// Unit price.
    pub unit_price: f64,
    /// Quantity.
    pub quantity: i64,
    /// Total amount as entered.
    pub total_amount: f64,
    /// Business date of the record (UTC text).
    pub record_date: String,
    /// Username that created the record.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for FinancialRecord {
    fn from_row(row: &'r SqliteRow) -> std::result::Result<Self, sqlx::Error> {
        let type_str: String = row.try_get("record_type")?;
        let record_type =
            RecordType::from_str(&type_str).map_err(|e| sqlx::Error::ColumnDecode {
                index: "record_type".to_string(),
                source: e.into(),
            })?;

        Ok(FinancialRecord {
            id: row.try_get("id")?,
            record_type,
            member_name: row.try_get("member_name")?,
            item: row.try_get("item")?,
            details: row.try_get("details")?,
            location: row.try_get("location")?,
            unit_price: row.try_get("unit_price")?,
            quantity: row.try_get("quantity")?,
            total_amount: row.try_get("total_amount")?,
            record_date: row.try_get("record_date")?,
            created_by: row.try_get("created_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Data for creating a financial record.
#[derive(Debug, Clone)]
pub struct NewFinancialRecord {
    /// Income or expense.
    pub record_type: RecordType,
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
    /// Total amount.
    pub total_amount: f64,
    /// Business date (UTC text).
    pub record_date: String,
    /// Creating username.
    pub created_by: String,
}

/// Repository for financial record operations.
pub struct FinancialRecordRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FinancialRecordRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new record, returning it with the assigned ID.
    pub async fn create(&self, new_record: &NewFinancialRecord) -> Result<FinancialRecord> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO financial_records
                (record_type, member_name, item, details, location,
                 unit_price, quantity, total_amount, record_date, created_by)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(new_record.record_type.as_str())
        .bind(&new_record.member_name)
        .bind(&new_record.item)
        .bind(&new_record.details)
        .bind(&new_record.location)
        .bind(new_record.unit_price)
        .bind(new_record.quantity)
        .bind(new_record.total_amount)
        .bind(&new_record.record_date)
        .bind(&new_record.created_by)
        .fetch_one(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| GymDeskError::NotFound("financial record".into()))
    }

    /// Get a record by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<FinancialRecord>> {
        let record = sqlx::query_as::<_, FinancialRecord>(
            "SELECT * FROM financial_records WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(record)
    }

    /// List every record, newest business date first.
    ///
    /// The reporting layer consumes the full set and filters in memory,
    /// matching the records-fetch contract.
    pub async fn list(&self) -> Result<Vec<FinancialRecord>> {
        let records = sqlx::query_as::<_, FinancialRecord>(
            "SELECT * FROM financial_records ORDER BY record_date DESC, id DESC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(records)
    }

    /// List records whose business date falls in [start, end], ascending.
    pub async fn list_between(&self, start: &str, end: &str) -> Result<Vec<FinancialRecord>> {
        let records = sqlx::query_as::<_, FinancialRecord>(
            "SELECT * FROM financial_records
             WHERE record_date >= ? AND record_date <= ?
             ORDER BY record_date ASC, id ASC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(records)
    }

    /// Delete a record by ID. Returns true if a row was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM financial_records WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| GymDeskError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn sample(record_type: RecordType, date: &str, amount: f64) -> NewFinancialRecord {
        NewFinancialRecord {
            record_type,
            member_name: "張三".to_string(),
            item: "月費".to_string(),
            details: String::new(),
            location: "Central".to_string(),
            unit_price: amount,
            quantity: 1,
            total_amount: amount,
            record_date: date.to_string(),
            created_by: "admin".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_record() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = FinancialRecordRepository::new(db.pool());

        let record = repo
            .create(&sample(RecordType::Income, "2024-01-15 00:00:00", 100.0))
            .await
            .unwrap();

        assert_eq!(record.record_type, RecordType::Income);
        assert_eq!(record.total_amount, 100.0);
        assert_eq!(record.member_name, "張三");

        let fetched = repo.get_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(fetched.item, "月費");
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = FinancialRecordRepository::new(db.pool());

        repo.create(&sample(RecordType::Income, "2024-01-10 00:00:00", 50.0))
            .await
            .unwrap();
        repo.create(&sample(RecordType::Expense, "2024-02-10 00:00:00", 20.0))
            .await
            .unwrap();

        let records = repo.list().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record_type, RecordType::Expense);
    }

    #[tokio::test]
    async fn test_list_between_inclusive() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = FinancialRecordRepository::new(db.pool());

        repo.create(&sample(RecordType::Income, "2024-01-01 00:00:00", 1.0))
            .await
            .unwrap();
        repo.create(&sample(RecordType::Income, "2024-01-31 23:59:59", 2.0))
            .await
            .unwrap();
        repo.create(&sample(RecordType::Income, "2024-02-01 00:00:00", 3.0))
            .await
            .unwrap();

        let records = repo
            .list_between("2024-01-01 00:00:00", "2024-01-31 23:59:59")
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_total_amount_not_reconciled() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = FinancialRecordRepository::new(db.pool());

        // unit_price * quantity disagrees with total_amount; stored as-is
        let mut record = sample(RecordType::Income, "2024-01-15 00:00:00", 100.0);
        record.unit_price = 30.0;
        record.quantity = 2;

        let stored = repo.create(&record).await.unwrap();
        assert_eq!(stored.total_amount, 100.0);
        assert_eq!(stored.unit_price, 30.0);
        assert_eq!(stored.quantity, 2);
    }

    #[tokio::test]
    async fn test_delete_record() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = FinancialRecordRepository::new(db.pool());

        let record = repo
            .create(&sample(RecordType::Income, "2024-01-15 00:00:00", 10.0))
            .await
            .unwrap();
        assert!(repo.delete(record.id).await.unwrap());
        assert!(repo.get_by_id(record.id).await.unwrap().is_none());
    }

    #[test]
    fn test_record_type_from_str() {
        assert_eq!(RecordType::from_str("income").unwrap(), RecordType::Income);
        assert_eq!(RecordType::from_str("EXPENSE").unwrap(), RecordType::Expense);
        assert!(RecordType::from_str("refund").is_err());
    }
}
