#![allow(dead_code)]

use track_core::{Module, Project, ProjectMember, Role, User};
use track_db::UserRepository;

use sqlx::SqlitePool;
use uuid::Uuid;

/// Creates a test User with the given role (not persisted)
pub fn user_with_role(role: Role) -> User {
    User::new(
        Uuid::new_v4(),
        format!("{} user", role.as_str()),
        format!("{}-{}@example.com", role.as_str(), Uuid::new_v4()),
        role,
    )
}

/// Creates and persists a test User with the given role
pub async fn insert_user(pool: &SqlitePool, role: Role) -> User {
    let user = user_with_role(role);
    UserRepository::new(pool.clone())
        .create(&user)
        .await
        .expect("Failed to create test user");
    user
}

/// Creates a test Project with sensible defaults (not persisted)
pub fn test_project(created_by: Uuid) -> Project {
    Project::new(
        "Gateway".to_string(),
        "rust/axum + sqlite".to_string(),
        "2026-S3".to_string(),
        created_by,
    )
}

/// Creates a test Module with sensible defaults (not persisted)
pub fn test_module(project_id: Uuid) -> Module {
    Module::new(
        project_id,
        "Auth Service".to_string(),
        "rust/axum".to_string(),
        "2026-S3".to_string(),
    )
}

/// Creates a test ProjectMember link (not persisted)
pub fn test_member(project_id: Uuid, user_id: Uuid) -> ProjectMember {
    ProjectMember::new(project_id, user_id, "contributor")
}
