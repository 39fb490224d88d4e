//! API handlers for the Web API.

pub mod attendance;
pub mod auth;
pub mod financial;
pub mod user;

pub use attendance::*;
pub use auth::*;
pub use financial::*;
pub use user::*;

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::NaiveDateTime;

use crate::config::Config;
use crate::datetime::now_in_timezone;
use crate::db::{Database, NewSessionToken, SessionTokenRepository, User, UserRepository};
use crate::Result;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (the pool inside is cheaply cloneable).
    pub db: Database,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Session lifetime in hours.
    pub session_ttl_hours: u64,
    /// Timezone used for report "now" and display formatting.
    pub timezone: String,
}

impl AppState {
    /// Create application state from the loaded configuration.
    pub fn new(db: Database, config: &Config) -> Self {
        Self {
            db,
            cookie_name: config.session.cookie_name.clone(),
            session_ttl_hours: config.session.ttl_hours,
            timezone: config.server.timezone.clone(),
        }
    }

    /// The current datetime in the configured timezone.
    pub fn now(&self) -> NaiveDateTime {
        now_in_timezone(&self.timezone)
    }

    /// Issue a new session token for a user.
    pub async fn issue_session(&self, user_id: i64) -> Result<String> {
        let token = uuid::Uuid::new_v4().to_string();
        let expires_at = chrono::Utc::now()
            + chrono::Duration::hours(self.session_ttl_hours as i64);

        let repo = SessionTokenRepository::new(self.db.pool());
        repo.create(&NewSessionToken {
            user_id,
            token: token.clone(),
            expires_at: expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .await?;

        Ok(token)
    }

    /// Resolve a session token to its active user.
    ///
    /// Returns `None` for unknown, expired, or revoked tokens, for
    /// deactivated accounts, and for rows whose stored role no longer
    /// parses (fail closed).
    pub async fn resolve_session(&self, token: &str) -> Result<Option<User>> {
        let tokens = SessionTokenRepository::new(self.db.pool());
        let Some(session) = tokens.get_valid_token(token).await? else {
            return Ok(None);
        };

        let users = UserRepository::new(self.db.pool());
        let user = match users.get_by_id(session.user_id).await {
            Ok(user) => user,
            Err(e) => {
                // Covers role-decode failures on tampered rows
                tracing::warn!(user_id = session.user_id, "session user unloadable: {e}");
                return Ok(None);
            }
        };

        Ok(user.filter(|u| u.is_active))
    }

    /// Build the session cookie carrying a token.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.cookie_name.clone(), token);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(time::Duration::hours(self.session_ttl_hours as i64));
        cookie
    }

    /// Build an expired cookie that clears the session.
    pub fn clear_session_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.cookie_name.clone(), "");
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(time::Duration::ZERO);
        cookie
    }
}
