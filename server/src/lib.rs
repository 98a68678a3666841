pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{login, signup},
        auth_response::AuthResponse,
        login_request::LoginRequest,
        signup_request::SignupRequest,
    },
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::actor::Actor,
    members::{
        create_member_request::CreateMemberRequest,
        member_dto::MemberDto,
        member_list_response::MemberListResponse,
        members::{add_member, list_members, remove_member},
    },
    modules::{
        create_module_request::CreateModuleRequest,
        list_modules_query::ListModulesQuery,
        module_dto::ModuleDto,
        module_list_response::ModuleListResponse,
        module_response::ModuleResponse,
        modules::{create_module, delete_module, get_module, list_modules, update_module},
        update_module_request::UpdateModuleRequest,
    },
    projects::{
        create_project_request::CreateProjectRequest,
        project_dto::ProjectDto,
        project_list_response::ProjectListResponse,
        project_response::ProjectResponse,
        projects::{create_project, delete_project, get_project, list_projects, update_project},
        update_project_request::UpdateProjectRequest,
    },
    users::{
        update_user_request::UpdateUserRequest,
        user_dto::UserDto,
        user_list_response::UserListResponse,
        user_response::UserResponse,
        users::{delete_user, get_user, list_users, update_user},
    },
};

pub use crate::routes::build_router;
pub use crate::state::AppState;
