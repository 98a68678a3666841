use crate::state::AppState;
use crate::{api, health};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use api::auth::auth::{login, signup};
use api::members::members::{add_member, list_members, remove_member};
use api::modules::modules::{
    create_module, delete_module, get_module, list_modules, update_module,
};
use api::projects::projects::{
    create_project, delete_project, get_project, list_projects, update_project,
};
use api::users::users::{delete_user, get_user, list_users, update_user};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Auth
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/auth/login", post(login))
        // Users
        .route("/api/v1/users", get(list_users))
        .route(
            "/api/v1/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        // Projects
        .route("/api/v1/projects", get(list_projects).post(create_project))
        .route(
            "/api/v1/projects/{id}",
            get(get_project).patch(update_project).delete(delete_project),
        )
        // Members
        .route(
            "/api/v1/projects/{id}/members",
            get(list_members).post(add_member),
        )
        .route("/api/v1/members/{id}", axum::routing::delete(remove_member))
        // Modules
        .route(
            "/api/v1/projects/{id}/modules",
            get(list_modules).post(create_module),
        )
        .route(
            "/api/v1/modules/{id}",
            get(get_module).patch(update_module).delete(delete_module),
        )
        // Add shared state
        .with_state(state)
        // CORS middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
