//! Auth session state machine.
//!
//! [`SessionController`] owns the single [`AuthState`] value and is the
//! only writer; everything else reads the state by reference. Backend
//! lookups go through the [`SessionStore`] trait so the machine can be
//! driven by the database store or by test doubles.

use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::routes::LOGIN_ROUTE;
use crate::db::{Role, SessionTokenRepository, User, UserRepository};
use sqlx::SqlitePool;

/// Errors from a session store backend.
#[derive(Error, Debug)]
pub enum SessionStoreError {
    /// The backend could not be reached or failed.
    #[error("session store backend error: {0}")]
    Backend(String),
}

/// The authenticated identity carried by [`AuthState::Authenticated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// User ID.
    pub id: i64,
    /// Login username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Role, already parsed into the closed enum.
    pub role: Role,
    /// Studio locations.
    pub locations: Vec<String>,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        CurrentUser {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role,
            locations: user.locations.clone(),
        }
    }
}

/// Authentication state.
///
/// `Unknown` is the state before the first session check completes; the
/// navigation guard defers any decision while it holds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No session check has completed yet.
    #[default]
    Unknown,
    /// A check completed and found no valid session.
    Anonymous,
    /// A check completed and resolved this user.
    Authenticated(CurrentUser),
}

impl AuthState {
    /// Whether the first session check is still outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Unknown)
    }

    /// Whether the state carries an authenticated user.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Backend session lookup used by [`SessionController`].
pub trait SessionStore {
    /// Resolve a session token to its user, `None` when the token is
    /// missing, expired, or revoked.
    fn load_session(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Option<CurrentUser>, SessionStoreError>> + Send;

    /// Invalidate a session token.
    fn invalidate(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<(), SessionStoreError>> + Send;
}

/// Session store over the `session_tokens` table.
#[derive(Clone)]
pub struct DbSessionStore {
    pool: SqlitePool,
}

impl DbSessionStore {
    /// Create a store over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SessionStore for DbSessionStore {
    async fn load_session(&self, token: &str) -> Result<Option<CurrentUser>, SessionStoreError> {
        let tokens = SessionTokenRepository::new(&self.pool);
        let session = tokens
            .get_valid_token(token)
            .await
            .map_err(|e| SessionStoreError::Backend(e.to_string()))?;

        let Some(session) = session else {
            return Ok(None);
        };

        let users = UserRepository::new(&self.pool);
        // A row with an out-of-enum role fails to decode here, which the
        // caller treats the same as no session.
        let user = users
            .get_by_id(session.user_id)
            .await
            .map_err(|e| SessionStoreError::Backend(e.to_string()))?;

        match user {
            Some(user) if user.is_active => Ok(Some(CurrentUser::from(&user))),
            _ => Ok(None),
        }
    }

    async fn invalidate(&self, token: &str) -> Result<(), SessionStoreError> {
        let tokens = SessionTokenRepository::new(&self.pool);
        tokens
            .revoke(token)
            .await
            .map_err(|e| SessionStoreError::Backend(e.to_string()))?;
        Ok(())
    }
}

/// Owner of the [`AuthState`] machine.
pub struct SessionController<S: SessionStore> {
    store: S,
    state: AuthState,
}

impl<S: SessionStore> SessionController<S> {
    /// Create a controller in the `Unknown` state.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: AuthState::Unknown,
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Run a session check against the store.
    ///
    /// Every failure mode (no token, backend error, unknown token,
    /// inactive user) lands in `Anonymous`. Errors are logged, never
    /// propagated: an unreachable backend must not wedge the state in
    /// `Unknown`.
    pub async fn check_auth(&mut self, token: Option<&str>) -> &AuthState {
        let Some(token) = token else {
            self.state = AuthState::Anonymous;
            return &self.state;
        };

        match self.store.load_session(token).await {
            Ok(Some(user)) => {
                debug!(username = %user.username, "session check resolved user");
                self.state = AuthState::Authenticated(user);
            }
            Ok(None) => {
                self.state = AuthState::Anonymous;
            }
            Err(e) => {
                warn!("session check failed, treating as anonymous: {e}");
                self.state = AuthState::Anonymous;
            }
        }
        &self.state
    }

    /// Record a successful login.
    ///
    /// The server side has already issued the session token and cookie;
    /// this is the in-memory transition only.
    pub fn login(&mut self, user: CurrentUser) {
        self.state = AuthState::Authenticated(user);
    }

    /// Log out, returning the path to navigate to.
    ///
    /// Token invalidation is best effort: a backend failure is logged and
    /// the local state still drops to `Anonymous`. The caller always
    /// lands on the login page.
    pub async fn logout(&mut self, token: Option<&str>) -> &'static str {
        if let Some(token) = token {
            if let Err(e) = self.store.invalidate(token).await {
                warn!("session invalidation failed during logout: {e}");
            }
        }
        self.state = AuthState::Anonymous;
        LOGIN_ROUTE
    }
}
