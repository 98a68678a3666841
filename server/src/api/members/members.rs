//! Project membership REST API handlers
//!
//! Membership is what grants non-privileged roles visibility into a
//! project, so managing it is admin-only.

use crate::state::AppState;
use crate::{
    ApiError, ApiResult, CreateMemberRequest, DeleteResponse, MemberDto, MemberListResponse,
};
use crate::api::extractors::actor::Actor;

use track_core::{ProjectMember, policy};
use track_db::{ProjectMemberRepository, ProjectRepository, UserRepository};

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// GET /api/v1/projects/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<MemberListResponse>> {
    let project_id = Uuid::parse_str(&id)?;

    let projects = ProjectRepository::new(state.pool.clone());
    projects
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Project {} not found", id)))?;

    let repo = ProjectMemberRepository::new(state.pool.clone());
    let members = repo.find_by_project(project_id).await?;

    if !policy::can_read_project(&actor, &members) {
        return Err(ApiError::forbidden(
            format!("role {} may not view this project", actor.role),
            None,
        ));
    }

    Ok(Json(MemberListResponse {
        members: members.into_iter().map(MemberDto::from).collect(),
    }))
}

/// POST /api/v1/projects/{id}/members
///
/// Admin-only.
pub async fn add_member(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(req): Json<CreateMemberRequest>,
) -> ApiResult<Json<MemberDto>> {
    let project_id = Uuid::parse_str(&id)?;
    let user_id = Uuid::parse_str(&req.user_id)?;

    if !policy::can_manage_members(&actor) {
        return Err(ApiError::forbidden(
            format!("role {} may not manage members", actor.role),
            None,
        ));
    }

    let projects = ProjectRepository::new(state.pool.clone());
    projects
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Project {} not found", id)))?;

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", req.user_id)))?;

    let repo = ProjectMemberRepository::new(state.pool.clone());
    if repo
        .find_by_user_and_project(user_id, project_id)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(format!(
            "{} is already a member of this project",
            user.email
        )));
    }

    let role_in_project = req
        .role_in_project
        .unwrap_or_else(|| user.role.as_str().to_string());
    let member = ProjectMember::new(project_id, user_id, &role_in_project);
    repo.create(&actor, &member).await?;

    log::info!("Member added: {} -> project {}", user.email, project_id);

    Ok(Json(MemberDto::from(member)))
}

/// DELETE /api/v1/members/{id}
///
/// Admin-only.
pub async fn remove_member(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let member_id = Uuid::parse_str(&id)?;

    let repo = ProjectMemberRepository::new(state.pool.clone());
    let deleted = repo.delete(&actor, member_id).await?;

    if !deleted {
        return Err(ApiError::not_found(format!("Membership {} not found", id)));
    }

    Ok(Json(DeleteResponse {
        deleted,
        id: member_id.to_string(),
    }))
}
