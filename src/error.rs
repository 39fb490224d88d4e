//! Error types for GYMDESK.

use thiserror::Error;

/// Common error type for GYMDESK.
#[derive(Error, Debug)]
pub enum GymDeskError {
    /// Database error.
    ///
    /// Wraps errors from the sqlx backend as strings so callers don't
    /// depend on sqlx error internals.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for GymDeskError {
    fn from(e: sqlx::Error) -> Self {
        GymDeskError::Database(e.to_string())
    }
}

/// Result type alias for GYMDESK operations.
pub type Result<T> = std::result::Result<T, GymDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = GymDeskError::Auth("invalid password".to_string());
        assert_eq!(err.to_string(), "authentication error: invalid password");
    }

    #[test]
    fn test_permission_error_display() {
        let err = GymDeskError::Permission("admin access required".to_string());
        assert_eq!(err.to_string(), "permission denied: admin access required");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = GymDeskError::NotFound("user".to_string());
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GymDeskError = io_err.into();
        assert!(matches!(err, GymDeskError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(GymDeskError::Auth("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
