//! User REST API handlers

use crate::state::AppState;
use crate::{
    ApiError, ApiResult, DeleteResponse, UpdateUserRequest, UserDto, UserListResponse,
    UserResponse,
};
use crate::api::extractors::actor::Actor;

use track_core::{Role, policy};
use track_db::{CredentialRepository, UserRepository};

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// GET /api/v1/users
///
/// The people directory is visible to any signed-in user.
pub async fn list_users(
    State(state): State<AppState>,
    Actor(_actor): Actor,
) -> ApiResult<Json<UserListResponse>> {
    let repo = UserRepository::new(state.pool.clone());
    let users = repo.find_all().await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(UserDto::from).collect(),
    }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Actor(_actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = Uuid::parse_str(&id)?;

    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;

    Ok(Json(UserResponse {
        user: user.into(),
    }))
}

/// PATCH /api/v1/users/{id}
///
/// Profile fields are editable by the owner or an admin; the role field
/// is admin-only.
pub async fn update_user(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = Uuid::parse_str(&id)?;

    let repo = UserRepository::new(state.pool.clone());
    let target = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;

    // Validate and authorize every field up front; a denied or invalid
    // field rejects the whole request before anything is written.
    if let Some(ref name) = req.name {
        if name.trim().is_empty() {
            return Err(ApiError::validation(
                "name cannot be empty",
                Some("name".into()),
            ));
        }
    }
    let role = req.role.as_deref().map(Role::from_str).transpose()?;

    if (req.name.is_some() || req.avatar_url.is_some())
        && !policy::can_update_user(&actor, &target)
    {
        let field = if req.name.is_some() {
            "name"
        } else {
            "avatar_url"
        };
        return Err(ApiError::forbidden(
            format!("role {} may not edit this profile", actor.role),
            Some(field.into()),
        ));
    }
    if role.is_some() && !policy::can_change_role(&actor) {
        return Err(ApiError::forbidden(
            format!("role {} may not change roles", actor.role),
            Some("role".into()),
        ));
    }

    if let Some(ref name) = req.name {
        repo.update_name(&actor, &target, name.trim()).await?;
    }
    if let Some(ref avatar) = req.avatar_url {
        repo.update_avatar(&actor, &target, avatar.as_deref()).await?;
    }
    if let Some(role) = role {
        repo.update_role(&actor, &target, role).await?;
        log::info!("Role change: {} -> {} (by {})", target.email, role, actor.email);
    }

    let updated = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;

    Ok(Json(UserResponse {
        user: updated.into(),
    }))
}

/// DELETE /api/v1/users/{id}
///
/// Admin-only. Removes the profile, its credential, and all membership
/// links; projects created by the user survive.
pub async fn delete_user(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let user_id = Uuid::parse_str(&id)?;

    let repo = UserRepository::new(state.pool.clone());
    let target = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;

    let deleted = repo.delete(&actor, user_id).await?;

    if deleted {
        let credentials = CredentialRepository::new(state.pool.clone());
        credentials.delete(target.auth_id).await?;
    }

    Ok(Json(DeleteResponse {
        deleted,
        id: user_id.to_string(),
    }))
}
