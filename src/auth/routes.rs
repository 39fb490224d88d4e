//! Route classification for navigation control.
//!
//! Classifies page paths into protected, public, and unclassified routes.
//! The lists are hand-maintained constants; a test asserts they stay
//! disjoint.

/// Page routes that require an authenticated session.
///
/// `/` matches exactly; every other entry matches itself and anything
/// nested beneath it.
pub const PROTECTED_ROUTES: &[&str] = &[
    "/",
    "/attendance",
    "/account_management",
    "/admin",
    "/financial_management",
];

/// Page routes reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &["/login", "/unauthorized"];

/// The login page; authenticated users are bounced off it.
pub const LOGIN_ROUTE: &str = "/login";

/// Where denied-but-authenticated users land.
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";

/// Where authenticated users are sent away from the login page.
pub const HOME_ROUTE: &str = "/";

/// Classification of a page path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Requires an authenticated session.
    Protected,
    /// Reachable anonymously.
    Public,
    /// Outside both lists; treated permissively.
    Unclassified,
}

/// Whether `path` matches `route` under the prefix rules.
///
/// The root route matches only the exact path `/`; a prefix rule for `/`
/// would swallow every path in the application.
fn matches_route(path: &str, route: &str) -> bool {
    if route == "/" {
        path == "/"
    } else {
        path.starts_with(route)
    }
}

/// Classify a page path.
///
/// Protected wins over public if a path were ever listed in both, which
/// the disjointness test rules out. Paths in neither list are
/// `Unclassified` and pass through the guard untouched.
pub fn classify(path: &str) -> RouteClass {
    if PROTECTED_ROUTES.iter().any(|r| matches_route(path, r)) {
        RouteClass::Protected
    } else if PUBLIC_ROUTES.iter().any(|r| matches_route(path, r)) {
        RouteClass::Public
    } else {
        RouteClass::Unclassified
    }
}

/// Whether `path` is the login page (or nested under it).
pub fn is_login_route(path: &str) -> bool {
    matches_route(path, LOGIN_ROUTE)
}
