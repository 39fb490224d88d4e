//! Navigation guard.
//!
//! Pure decision function run whenever the path or auth state changes.
//! The rule order is load-bearing: the anonymous check runs before any
//! role check, so an unauthenticated visitor is always sent to login
//! rather than to the unauthorized page.

use crate::auth::controller::AuthState;
use crate::auth::policy::has_route_access;
use crate::auth::routes::{classify, is_login_route, RouteClass, HOME_ROUTE, LOGIN_ROUTE, UNAUTHORIZED_ROUTE};

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Auth state still unknown; make no decision yet.
    Deferred,
    /// Stay on the requested path.
    Proceed,
    /// Send to the login page, carrying the url-encoded original path.
    ToLogin {
        /// Url-encoded path to return to after login.
        redirect: String,
    },
    /// Already signed in; send away from the login page.
    ToHome,
    /// Signed in but denied by policy.
    ToUnauthorized,
}

impl GuardOutcome {
    /// Redirect target, `None` when no navigation happens.
    pub fn location(&self) -> Option<String> {
        match self {
            GuardOutcome::Deferred | GuardOutcome::Proceed => None,
            GuardOutcome::ToLogin { redirect } => {
                Some(format!("{LOGIN_ROUTE}?redirect={redirect}"))
            }
            GuardOutcome::ToHome => Some(HOME_ROUTE.to_string()),
            GuardOutcome::ToUnauthorized => Some(UNAUTHORIZED_ROUTE.to_string()),
        }
    }
}

/// Evaluate the guard for a path under the given auth state.
///
/// Rules, in order:
/// 1. Unknown state: defer, decide nothing.
/// 2. Protected path while anonymous: to login, preserving the path.
/// 3. Login path while authenticated: to home.
/// 4. Protected path the user's role may not see: to unauthorized.
/// 5. Otherwise proceed (public and unclassified paths included).
pub fn evaluate(path: &str, state: &AuthState) -> GuardOutcome {
    let class = classify(path);

    match state {
        AuthState::Unknown => GuardOutcome::Deferred,
        AuthState::Anonymous => {
            if class == RouteClass::Protected {
                GuardOutcome::ToLogin {
                    redirect: urlencoding::encode(path).into_owned(),
                }
            } else {
                GuardOutcome::Proceed
            }
        }
        AuthState::Authenticated(user) => {
            if is_login_route(path) {
                GuardOutcome::ToHome
            } else if class == RouteClass::Protected && !has_route_access(user.role, path) {
                GuardOutcome::ToUnauthorized
            } else {
                GuardOutcome::Proceed
            }
        }
    }
}
