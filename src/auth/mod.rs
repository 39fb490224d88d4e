//! Authentication and navigation control for GYMDESK.
//!
//! This module provides password hashing, the session state machine,
//! route classification, the role access policy, and the navigation
//! guard that ties them together.

pub mod controller;
pub mod guard;
mod password;
pub mod policy;
pub mod routes;

pub use controller::{
    AuthState, CurrentUser, DbSessionStore, SessionController, SessionStore, SessionStoreError,
};
pub use guard::{evaluate, GuardOutcome};
pub use password::{hash_password, validate_password, verify_password, PasswordError};
pub use policy::{access_for_role_name, has_route_access, require_admin, require_staff, PolicyError};
pub use routes::{classify, RouteClass, HOME_ROUTE, LOGIN_ROUTE, UNAUTHORIZED_ROUTE};
