//! Account management handlers (admin only).

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::{hash_password, require_admin};
use crate::db::{NewUser, Role, UserRepository, UserUpdate};
use crate::web::dto::{ApiResponse, CreateUserRequest, UpdateUserRequest, UserInfo};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::SessionUser;

/// GET /api/users - list all accounts.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    SessionUser(caller): SessionUser,
) -> Result<Json<ApiResponse<Vec<UserInfo>>>, ApiError> {
    require_admin(Some(&caller))?;

    let repo = UserRepository::new(state.db.pool());
    let users = repo.list().await.map_err(ApiError::from)?;
    let infos = users.iter().map(UserInfo::from).collect();
    Ok(Json(ApiResponse::new(infos)))
}

/// POST /api/users - create an account.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    SessionUser(caller): SessionUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    require_admin(Some(&caller))?;

    if req.username.trim().is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }

    // Out-of-enum role strings are rejected here, not defaulted
    let role = match req.role.as_deref() {
        Some(role_str) => Role::from_str(role_str)
            .map_err(|_| ApiError::unprocessable(format!("unknown role: {role_str}")))?,
        None => Role::default(),
    };

    let password_hash =
        hash_password(&req.password).map_err(|e| ApiError::unprocessable(e.to_string()))?;

    let repo = UserRepository::new(state.db.pool());
    if repo
        .get_by_username(&req.username)
        .await
        .map_err(ApiError::from)?
        .is_some()
    {
        return Err(ApiError::conflict("Username is already taken"));
    }

    let new_user = NewUser::new(req.username, password_hash, req.name)
        .with_role(role)
        .with_locations(req.locations);
    let user = repo.create(&new_user).await.map_err(ApiError::from)?;

    tracing::info!(username = %user.username, role = %user.role, "account created");
    Ok(Json(ApiResponse::new(UserInfo::from(&user))))
}

/// GET /api/users/{id} - fetch one account.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    SessionUser(caller): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    require_admin(Some(&caller))?;

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(ApiResponse::new(UserInfo::from(&user))))
}

/// PATCH /api/users/{id} - partial account update.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    SessionUser(caller): SessionUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    require_admin(Some(&caller))?;

    let mut update = UserUpdate::new();

    if let Some(password) = &req.password {
        let hash = hash_password(password).map_err(|e| ApiError::unprocessable(e.to_string()))?;
        update = update.password(hash);
    }
    if let Some(name) = req.name {
        update = update.name(name);
    }
    if let Some(role_str) = &req.role {
        let role = Role::from_str(role_str)
            .map_err(|_| ApiError::unprocessable(format!("unknown role: {role_str}")))?;
        update = update.role(role);
    }
    if let Some(locations) = req.locations {
        update = update.locations(locations);
    }
    if let Some(is_active) = req.is_active {
        update = update.is_active(is_active);
    }

    if update.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .update(id, &update)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    // Deactivation cuts existing sessions immediately
    if req.is_active == Some(false) {
        let tokens = crate::db::SessionTokenRepository::new(state.db.pool());
        if let Err(e) = tokens.revoke_all_for_user(id).await {
            tracing::warn!(user_id = id, "failed to revoke sessions on deactivation: {e}");
        }
    }

    Ok(Json(ApiResponse::new(UserInfo::from(&user))))
}

/// DELETE /api/users/{id} - remove an account.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    SessionUser(caller): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    require_admin(Some(&caller))?;

    if caller.id == id {
        return Err(ApiError::bad_request("Cannot delete your own account"));
    }

    let repo = UserRepository::new(state.db.pool());
    let deleted = repo.delete(id).await.map_err(ApiError::from)?;
    if !deleted {
        return Err(ApiError::not_found("User not found"));
    }

    tracing::info!(user_id = id, "account deleted");
    Ok(Json(ApiResponse::new(())))
}
