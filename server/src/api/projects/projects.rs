//! Project REST API handlers
//!
//! Visibility is row-level: privileged readers (admin, pm, cto) see
//! every project, everyone else only those they are a member of. The
//! repository applies the same rule, so handlers here only add the
//! request/response shaping.

use crate::state::AppState;
use crate::{
    ApiError, ApiResult, CreateProjectRequest, DeleteResponse, ProjectDto, ProjectListResponse,
    ProjectResponse, UpdateProjectRequest,
};
use crate::api::extractors::actor::Actor;

use track_core::{Project, ProjectChange, WorkStatus, policy};
use track_db::{ProjectMemberRepository, ProjectRepository};

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// GET /api/v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> ApiResult<Json<ProjectListResponse>> {
    let repo = ProjectRepository::new(state.pool.clone());
    let projects = repo.find_visible(&actor).await?;

    Ok(Json(ProjectListResponse {
        projects: projects.into_iter().map(ProjectDto::from).collect(),
    }))
}

/// POST /api/v1/projects
///
/// Admin-only.
pub async fn create_project(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    if !policy::can_create_project(&actor) {
        return Err(ApiError::forbidden(
            format!("role {} may not create projects", actor.role),
            None,
        ));
    }

    let title = req.title.trim();
    if title.is_empty() {
        return Err(ApiError::validation(
            "title cannot be empty",
            Some("title".into()),
        ));
    }

    let mut project = Project::new(
        title.to_string(),
        req.stack.unwrap_or_default(),
        req.sprint.unwrap_or_default(),
        actor.id,
    );
    project.notes = req.notes;

    let repo = ProjectRepository::new(state.pool.clone());
    repo.create(&actor, &project).await?;

    log::info!("Project created: {} ({})", project.title, project.id);

    Ok(Json(ProjectResponse {
        project: project.into(),
    }))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectResponse>> {
    let project_id = Uuid::parse_str(&id)?;

    let repo = ProjectRepository::new(state.pool.clone());
    let project = repo
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Project {} not found", id)))?;

    let members = ProjectMemberRepository::new(state.pool.clone())
        .find_by_project(project_id)
        .await?;
    if !policy::can_read_project(&actor, &members) {
        return Err(ApiError::forbidden(
            format!("role {} may not view this project", actor.role),
            None,
        ));
    }

    Ok(Json(ProjectResponse {
        project: project.into(),
    }))
}

/// PATCH /api/v1/projects/{id}
///
/// Field-scoped: only the fields present in the request are written.
pub async fn update_project(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let project_id = Uuid::parse_str(&id)?;

    let repo = ProjectRepository::new(state.pool.clone());
    repo.find_by_id(project_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Project {} not found", id)))?;

    let mut changes: Vec<ProjectChange> = Vec::new();
    if let Some(title) = req.title {
        if title.trim().is_empty() {
            return Err(ApiError::validation(
                "title cannot be empty",
                Some("title".into()),
            ));
        }
        changes.push(ProjectChange::Title(title.trim().to_string()));
    }
    if let Some(stack) = req.stack {
        changes.push(ProjectChange::Stack(stack));
    }
    if let Some(sprint) = req.sprint {
        changes.push(ProjectChange::Sprint(sprint));
    }
    if let Some(notes) = req.notes {
        changes.push(ProjectChange::Notes(notes));
    }
    if let Some(status) = req.status {
        changes.push(ProjectChange::Status(WorkStatus::from_str(&status)?));
    }

    repo.update_fields(&actor, project_id, &changes).await?;

    let updated = repo
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Project {} not found", id)))?;

    Ok(Json(ProjectResponse {
        project: updated.into(),
    }))
}

/// DELETE /api/v1/projects/{id}
///
/// Admin-only. Modules and member links cascade with the project.
pub async fn delete_project(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let project_id = Uuid::parse_str(&id)?;

    let repo = ProjectRepository::new(state.pool.clone());
    let deleted = repo.delete(&actor, project_id).await?;

    if !deleted {
        return Err(ApiError::not_found(format!("Project {} not found", id)));
    }

    log::info!("Project deleted: {}", project_id);

    Ok(Json(DeleteResponse {
        deleted,
        id: project_id.to_string(),
    }))
}
