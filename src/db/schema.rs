//! Database schema migrations for GYMDESK.
//!
//! Each entry is applied once, in order, inside its own transaction; the
//! applied version is tracked in the `schema_version` table.

/// Ordered list of schema migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    "CREATE TABLE users (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        username    TEXT NOT NULL UNIQUE COLLATE NOCASE,
        password    TEXT NOT NULL,
        name        TEXT NOT NULL,
        role        TEXT NOT NULL DEFAULT 'member',
        locations   TEXT NOT NULL DEFAULT '[]',
        created_at  TEXT NOT NULL DEFAULT (datetime('now')),
        last_login  TEXT,
        is_active   INTEGER NOT NULL DEFAULT 1
    );
    CREATE INDEX idx_users_role ON users(role);",
    // v2: server-side session tokens
    "CREATE TABLE session_tokens (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        token       TEXT NOT NULL UNIQUE,
        expires_at  TEXT NOT NULL,
        created_at  TEXT NOT NULL DEFAULT (datetime('now')),
        revoked_at  TEXT
    );
    CREATE INDEX idx_session_tokens_user ON session_tokens(user_id);",
    // v3: financial records
    "CREATE TABLE financial_records (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        record_type  TEXT NOT NULL CHECK (record_type IN ('income', 'expense')),
        member_name  TEXT NOT NULL,
        item         TEXT NOT NULL,
        details      TEXT NOT NULL DEFAULT '',
        location     TEXT NOT NULL DEFAULT '',
        unit_price   REAL NOT NULL DEFAULT 0,
        quantity     INTEGER NOT NULL DEFAULT 1,
        total_amount REAL NOT NULL DEFAULT 0,
        record_date  TEXT NOT NULL,
        created_by   TEXT NOT NULL DEFAULT '',
        created_at   TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX idx_financial_records_date ON financial_records(record_date);
    CREATE INDEX idx_financial_records_type ON financial_records(record_type);",
    // v4: attendance scans
    "CREATE TABLE attendance_scans (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        activity_id   TEXT NOT NULL DEFAULT '',
        activity_name TEXT NOT NULL DEFAULT '',
        member_id     TEXT NOT NULL DEFAULT '',
        member_name   TEXT NOT NULL DEFAULT '',
        scan_time     TEXT NOT NULL DEFAULT (datetime('now')),
        scan_type     TEXT NOT NULL DEFAULT 'scan' CHECK (scan_type IN ('scan', 'manual')),
        ip_address    TEXT,
        user_agent    TEXT
    );
    CREATE INDEX idx_attendance_scans_activity ON attendance_scans(activity_id);
    CREATE INDEX idx_attendance_scans_time ON attendance_scans(scan_time);",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_migrations_contain_core_tables() {
        let all: String = MIGRATIONS.concat();
        for table in [
            "users",
            "session_tokens",
            "financial_records",
            "attendance_scans",
        ] {
            assert!(all.contains(table), "missing table: {table}");
        }
    }
}
