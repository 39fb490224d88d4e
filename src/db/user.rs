//! User model for GYMDESK.
//!
//! Defines the User struct and the closed Role enum used for access control.

use std::fmt;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// User role for access control.
///
/// This is a closed enumeration: every role the system knows is a variant,
/// and policy code matches exhaustively over it. Role values arriving as
/// strings (database rows, API payloads) must pass through [`Role::from_str`],
/// which rejects anything outside the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Administrator: full access to every page and API.
    Admin,
    /// Trainer: attendance pages plus general pages, no account management.
    Trainer,
    /// Gym member.
    #[default]
    Member,
    /// Regular user account (legacy role kept for older records).
    User,
}

impl Role {
    /// Convert role to its database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Trainer => "trainer",
            Role::Member => "member",
            Role::User => "user",
        }
    }

    /// Get the display name for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "管理員",
            Role::Trainer => "教練",
            Role::Member => "會員",
            Role::User => "用戶",
        }
    }

    /// Whether this role may manage other accounts.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether this role is gym staff (admin or trainer).
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Trainer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "trainer" => Ok(Role::Trainer),
            "member" => Ok(Role::Member),
            "user" => Ok(Role::User),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// User entity representing a CRM account.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique).
    pub username: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Display name.
    pub name: String,
    /// User role for access control.
    pub role: Role,
    /// Studio locations this user belongs to.
    pub locations: Vec<String>,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last login timestamp (optional).
    pub last_login: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for User {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let role_str: String = row.try_get("role")?;
        let role = Role::from_str(&role_str).map_err(|e| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: e.into(),
        })?;

        let locations_json: String = row.try_get("locations")?;
        let locations: Vec<String> = serde_json::from_str(&locations_json).unwrap_or_default();

        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password: row.try_get("password")?,
            name: row.try_get("name")?,
            role,
            locations,
            created_at: row.try_get("created_at")?,
            last_login: row.try_get("last_login")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password: String,
    /// Display name.
    pub name: String,
    /// User role (defaults to Member).
    pub role: Role,
    /// Studio locations.
    pub locations: Vec<String>,
}

impl NewUser {
    /// Create a new user with minimal required fields.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            name: name.into(),
            role: Role::Member,
            locations: vec![],
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the studio locations.
    pub fn with_locations(mut self, locations: Vec<String>) -> Self {
        self.locations = locations;
        self
    }
}

/// Data for updating an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New password hash (if changing password).
    pub password: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New role.
    pub role: Option<Role>,
    /// New locations list.
    pub locations: Option<Vec<String>>,
    /// New active status.
    pub is_active: Option<bool>,
}

impl UserUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new password hash.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set new display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set new role.
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set new locations.
    pub fn locations(mut self, locations: Vec<String>) -> Self {
        self.locations = Some(locations);
        self
    }

    /// Set active status.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.password.is_none()
            && self.name.is_none()
            && self.role.is_none()
            && self.locations.is_none()
            && self.is_active.is_none()
    }
}
