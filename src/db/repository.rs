//! User repository for GYMDESK.

use sqlx::{QueryBuilder, SqlitePool};

use super::user::{NewUser, User, UserUpdate};
use crate::{GymDeskError, Result};

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user, returning it with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let locations = serde_json::to_string(&new_user.locations)
            .map_err(|e| GymDeskError::Validation(format!("invalid locations: {e}")))?;

        let result = sqlx::query(
            "INSERT INTO users (username, password, name, role, locations)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .bind(&new_user.name)
        .bind(new_user.role.as_str())
        .bind(&locations)
        .execute(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| GymDeskError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, name, role, locations,
                    created_at, last_login, is_active
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by username (case-insensitive).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, name, role, locations,
                    created_at, last_login, is_active
             FROM users WHERE username = ? COLLATE NOCASE",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List all users ordered by creation time.
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, password, name, role, locations,
                    created_at, last_login, is_active
             FROM users ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(users)
    }

    /// Update a user by ID. Only fields set in the update are modified.
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<Option<User>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut builder = QueryBuilder::new("UPDATE users SET ");
        let mut separated = builder.separated(", ");

        if let Some(ref password) = update.password {
            separated.push("password = ");
            separated.push_bind_unseparated(password);
        }
        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
        }
        if let Some(role) = update.role {
            separated.push("role = ");
            separated.push_bind_unseparated(role.as_str());
        }
        if let Some(ref locations) = update.locations {
            let json = serde_json::to_string(locations)
                .map_err(|e| GymDeskError::Validation(format!("invalid locations: {e}")))?;
            separated.push("locations = ");
            separated.push_bind_unseparated(json);
        }
        if let Some(is_active) = update.is_active {
            separated.push("is_active = ");
            separated.push_bind_unseparated(is_active);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);

        builder
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| GymDeskError::Database(e.to_string()))?;

        self.get_by_id(id).await
    }

    /// Record a successful login.
    pub async fn update_last_login(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = datetime('now') WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| GymDeskError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a user by ID. Returns true if a row was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| GymDeskError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}
