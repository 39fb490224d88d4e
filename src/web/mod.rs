//! Web API for GYMDESK.
//!
//! Serves the JSON API the CRM frontend consumes: session auth,
//! navigation decisions, account management, financial records and
//! reporting, and attendance scans.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::{ApiError, ErrorCode};
pub use handlers::AppState;
pub use server::WebServer;
