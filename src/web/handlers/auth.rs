//! Authentication and navigation handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::auth::{evaluate, AuthState, CurrentUser};
use crate::db::UserRepository;
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, NavigateResponse, SessionCheckResponse,
    SessionUserInfo,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::OptionalSessionUser;

/// POST /api/auth/login - create a session from credentials.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    // Same generic message for unknown user and wrong password
    let users = UserRepository::new(state.db.pool());
    let user = users
        .get_by_username(&req.username)
        .await
        .map_err(|_| ApiError::unauthorized("Invalid username or password"))?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    crate::auth::verify_password(&req.password, &user.password)
        .map_err(|_| ApiError::unauthorized("Invalid username or password"))?;

    if !user.is_active {
        return Err(ApiError::forbidden("Account is disabled"));
    }

    let token = state.issue_session(user.id).await.map_err(|e| {
        tracing::error!("Failed to create session: {e}");
        ApiError::internal("Failed to create session")
    })?;

    if let Err(e) = users.update_last_login(user.id).await {
        tracing::warn!(user_id = user.id, "failed to update last_login: {e}");
    }

    tracing::info!(username = %user.username, "user logged in");

    let jar = jar.add(state.session_cookie(token));
    let response = LoginResponse {
        user: SessionUserInfo::from(&CurrentUser::from(&user)),
    };
    Ok((jar, Json(ApiResponse::new(response))))
}

/// POST /api/auth/logout - revoke the session and clear the cookie.
///
/// Revocation is best effort: a backend failure is logged, the cookie is
/// cleared regardless, and the response still reports success.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<()>>) {
    if let Some(cookie) = jar.get(&state.cookie_name) {
        let token = cookie.value().to_string();
        let tokens = crate::db::SessionTokenRepository::new(state.db.pool());
        if let Err(e) = tokens.revoke(&token).await {
            tracing::warn!("failed to revoke session on logout: {e}");
        }
    }

    let jar = jar.add(state.clear_session_cookie());
    (jar, Json(ApiResponse::new(())))
}

/// GET /api/auth/me - session check.
///
/// Always answers 200. A missing or dead session is `success: false`
/// with a null user, which the caller maps to the Anonymous state.
pub async fn me(
    OptionalSessionUser(user): OptionalSessionUser,
) -> Json<SessionCheckResponse> {
    match user {
        Some(user) => Json(SessionCheckResponse {
            success: true,
            user: Some(SessionUserInfo::from(&CurrentUser::from(&user))),
        }),
        None => Json(SessionCheckResponse {
            success: false,
            user: None,
        }),
    }
}

/// Query parameters for the navigation endpoint.
#[derive(Debug, Deserialize)]
pub struct NavigateQuery {
    /// The page path being navigated to.
    pub path: String,
}

/// GET /api/auth/navigate?path=... - guard decision for the SPA router.
///
/// The caller's session resolves to Anonymous or Authenticated; the
/// state is never Unknown here because the check just ran, so a
/// "deferred" action cannot come back from this endpoint.
pub async fn navigate(
    OptionalSessionUser(user): OptionalSessionUser,
    Query(query): Query<NavigateQuery>,
) -> Json<ApiResponse<NavigateResponse>> {
    let auth_state = match &user {
        Some(user) => AuthState::Authenticated(CurrentUser::from(user)),
        None => AuthState::Anonymous,
    };

    let outcome = evaluate(&query.path, &auth_state);
    Json(ApiResponse::new(NavigateResponse::from(outcome)))
}
