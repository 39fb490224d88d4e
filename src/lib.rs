//! GYMDESK - gym and fitness-studio CRM backend.
//!
//! A single-binary web service: cookie-session authentication, a
//! role-based navigation guard, account management, attendance scans,
//! and financial reporting over SQLite.

pub mod auth;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod report;
pub mod web;

pub use auth::{
    access_for_role_name, classify, evaluate, has_route_access, hash_password, require_admin,
    require_staff, validate_password, verify_password, AuthState, CurrentUser, DbSessionStore,
    GuardOutcome, PasswordError, PolicyError, RouteClass, SessionController, SessionStore,
    SessionStoreError,
};
pub use config::Config;
pub use db::{Database, NewUser, Role, User, UserRepository, UserUpdate};
pub use error::{GymDeskError, Result};
pub use report::{monthly_trend, summarize, PeriodReport, ReportPeriod, TrendReport};
pub use web::WebServer;
