//! Module REST API handlers
//!
//! Every field write goes through the role policy twice: once here so
//! the response can name the offending field, and once inside the
//! repository as the final gate. A denied field rejects the whole
//! batch; nothing is written.

use crate::state::AppState;
use crate::{
    ApiError, ApiResult, CreateModuleRequest, DeleteResponse, ListModulesQuery, ModuleDto,
    ModuleListResponse, ModuleResponse, UpdateModuleRequest,
};
use crate::api::extractors::actor::Actor;

use track_core::{Module, WorkStatus, policy};
use track_db::{ModuleRepository, ProjectMemberRepository, ProjectRepository};

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

/// GET /api/v1/projects/{id}/modules
///
/// Lists the modules of a project the actor may see, with optional
/// `status`, `sprint`, and `q` (name substring) filters.
pub async fn list_modules(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Query(query): Query<ListModulesQuery>,
) -> ApiResult<Json<ModuleListResponse>> {
    let project_id = Uuid::parse_str(&id)?;

    let projects = ProjectRepository::new(state.pool.clone());
    projects
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Project {} not found", id)))?;

    let status = query
        .status
        .as_deref()
        .map(WorkStatus::from_str)
        .transpose()?;
    let needle = query.q.as_deref().map(str::to_lowercase);

    let repo = ModuleRepository::new(state.pool.clone());
    let modules = repo.find_visible_by_project(&actor, project_id).await?;

    let modules = modules
        .into_iter()
        .filter(|m| status.is_none_or(|s| m.status == s))
        .filter(|m| query.sprint.as_deref().is_none_or(|s| m.sprint == s))
        .filter(|m| {
            needle
                .as_deref()
                .is_none_or(|q| m.module_name.to_lowercase().contains(q))
        })
        .map(ModuleDto::from)
        .collect();

    Ok(Json(ModuleListResponse { modules }))
}

/// POST /api/v1/projects/{id}/modules
///
/// Admin or PM.
pub async fn create_module(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(req): Json<CreateModuleRequest>,
) -> ApiResult<Json<ModuleResponse>> {
    let project_id = Uuid::parse_str(&id)?;

    if !policy::can_create_module(&actor) {
        return Err(ApiError::forbidden(
            format!("role {} may not create modules", actor.role),
            None,
        ));
    }

    let name = req.module_name.trim();
    if name.is_empty() {
        return Err(ApiError::validation(
            "module_name cannot be empty",
            Some("module_name".into()),
        ));
    }

    let projects = ProjectRepository::new(state.pool.clone());
    projects
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Project {} not found", id)))?;

    let mut module = Module::new(
        project_id,
        name.to_string(),
        req.platform_stack.unwrap_or_default(),
        req.sprint.unwrap_or_default(),
    );
    if let Some(ref dev) = req.assigned_dev_id {
        module.assigned_dev_id = Some(Uuid::parse_str(dev)?);
    }
    module.notes = req.notes;

    let repo = ModuleRepository::new(state.pool.clone());
    repo.create(&actor, &module).await?;

    log::info!("Module created: {} in project {}", module.module_name, project_id);

    Ok(Json(ModuleResponse {
        module: module.into(),
    }))
}

/// GET /api/v1/modules/{id}
pub async fn get_module(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<ModuleResponse>> {
    let module_id = Uuid::parse_str(&id)?;

    let repo = ModuleRepository::new(state.pool.clone());
    let module = repo
        .find_by_id(module_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Module {} not found", id)))?;

    let members = ProjectMemberRepository::new(state.pool.clone())
        .find_by_project(module.project_id)
        .await?;
    if !policy::can_read_module(&actor, &module, &members) {
        return Err(ApiError::forbidden(
            format!("role {} may not view this module", actor.role),
            None,
        ));
    }

    Ok(Json(ModuleResponse {
        module: module.into(),
    }))
}

/// PATCH /api/v1/modules/{id}
pub async fn update_module(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(req): Json<UpdateModuleRequest>,
) -> ApiResult<Json<ModuleResponse>> {
    let module_id = Uuid::parse_str(&id)?;

    let repo = ModuleRepository::new(state.pool.clone());
    let module = repo
        .find_by_id(module_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Module {} not found", id)))?;

    let members = ProjectMemberRepository::new(state.pool.clone())
        .find_by_project(module.project_id)
        .await?;
    if !policy::can_read_module(&actor, &module, &members) {
        return Err(ApiError::forbidden(
            format!("role {} may not view this module", actor.role),
            None,
        ));
    }

    let changes = req.changes()?;

    // Check the whole batch up front so the response can name the
    // first denied field. The repository re-checks before writing.
    for change in &changes {
        let field = change.field();
        if !policy::can_edit_module_field(&actor, field, &module) {
            return Err(ApiError::forbidden(
                format!("role {} may not edit {}", actor.role, field.as_str()),
                Some(field.as_str().to_string()),
            ));
        }
    }

    repo.update_fields(&actor, &module, &changes).await?;

    let updated = repo
        .find_by_id(module_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Module {} not found", id)))?;

    Ok(Json(ModuleResponse {
        module: updated.into(),
    }))
}

/// DELETE /api/v1/modules/{id}
///
/// Admin-only.
pub async fn delete_module(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let module_id = Uuid::parse_str(&id)?;

    let repo = ModuleRepository::new(state.pool.clone());
    let deleted = repo.delete(&actor, module_id).await?;

    if !deleted {
        return Err(ApiError::not_found(format!("Module {} not found", id)));
    }

    Ok(Json(DeleteResponse {
        deleted,
        id: module_id.to_string(),
    }))
}
