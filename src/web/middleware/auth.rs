//! Cookie-session authentication extractors.
//!
//! Both extractors read the session cookie and resolve it against the
//! `session_tokens` table. Anything that fails on the way (missing
//! cookie, unknown or expired token, deactivated account, a stored role
//! outside the known set) resolves to "no session". [`SessionUser`]
//! then rejects with 401, [`OptionalSessionUser`] carries `None`.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::db::User;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Extractor that requires a valid session.
#[derive(Debug, Clone)]
pub struct SessionUser(pub User);

impl FromRequestParts<Arc<AppState>> for SessionUser {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = resolve_session(parts, state).await;
            match user {
                Some(user) => Ok(SessionUser(user)),
                None => Err(ApiError::unauthorized("login required")),
            }
        })
    }
}

/// Extractor that resolves a session when present but never rejects.
#[derive(Debug, Clone)]
pub struct OptionalSessionUser(pub Option<User>);

impl FromRequestParts<Arc<AppState>> for OptionalSessionUser {
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move { Ok(OptionalSessionUser(resolve_session(parts, state).await)) })
    }
}

/// Session token from the request's cookie header, if any.
pub fn session_token(parts: &Parts, state: &AppState) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(&state.cookie_name)
        .map(|cookie| cookie.value().to_string())
}

async fn resolve_session(parts: &Parts, state: &AppState) -> Option<User> {
    let token = session_token(parts, state)?;
    match state.resolve_session(&token).await {
        Ok(user) => user,
        Err(e) => {
            // Failures degrade to anonymous rather than surfacing 500s
            tracing::warn!("session resolution failed: {e}");
            None
        }
    }
}
