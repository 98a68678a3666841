#![allow(dead_code)]

//! Test infrastructure for track-server API tests

use track_auth::TokenService;
use track_core::{Role, User};
use track_db::UserRepository;
use track_server::AppState;

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-32-bytes";

/// Create a test pool with in-memory SQLite.
/// One connection so every query sees the same in-memory database.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create test database");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    track_db::connection::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing
pub async fn create_test_state() -> AppState {
    AppState {
        pool: create_test_pool().await,
        tokens: Arc::new(TokenService::new(TEST_SECRET, 3600)),
    }
}

/// Create a user with the given role and mint a session token for them
pub async fn create_user(state: &AppState, name: &str, role: Role) -> (User, String) {
    let user = User::new(
        Uuid::new_v4(),
        name.to_string(),
        format!("{}@test.local", name.to_lowercase().replace(' ', ".")),
        role,
    );

    UserRepository::new(state.pool.clone())
        .create(&user)
        .await
        .expect("Failed to create test user");

    let token = state
        .tokens
        .issue(user.auth_id)
        .expect("Failed to issue test token");

    (user, token)
}

/// Insert a project directly, bypassing the API
pub async fn create_test_project(pool: &SqlitePool, created_by: Uuid, title: &str) -> Uuid {
    let project_id = Uuid::new_v4();
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
            INSERT INTO projects (id, title, stack, sprint, notes, status, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(project_id.to_string())
    .bind(title)
    .bind("Rust/Axum")
    .bind("2026-S3")
    .bind(Option::<String>::None)
    .bind("in_progress")
    .bind(created_by.to_string())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("Failed to create test project");

    project_id
}

/// Insert a module directly, bypassing the API
pub async fn create_test_module(
    pool: &SqlitePool,
    project_id: Uuid,
    name: &str,
    assigned_dev_id: Option<Uuid>,
) -> Uuid {
    let module_id = Uuid::new_v4();
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
            INSERT INTO project_modules (
                id, project_id, module_name, platform_stack, assigned_dev_id,
                cto_review_status, client_ready_status, status, sprint,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, 'pending', 'pending', 'not_started', ?, ?, ?)
        "#,
    )
    .bind(module_id.to_string())
    .bind(project_id.to_string())
    .bind(name)
    .bind("Rust")
    .bind(assigned_dev_id.map(|id| id.to_string()))
    .bind("2026-S3")
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("Failed to create test module");

    module_id
}

/// Link a user to a project, bypassing the API
pub async fn add_test_member(pool: &SqlitePool, project_id: Uuid, user_id: Uuid) -> Uuid {
    let member_id = Uuid::new_v4();

    sqlx::query(
        r#"
            INSERT INTO project_members (id, project_id, user_id, role_in_project, created_at)
            VALUES (?, ?, ?, 'member', ?)
        "#,
    )
    .bind(member_id.to_string())
    .bind(project_id.to_string())
    .bind(user_id.to_string())
    .bind(chrono::Utc::now().timestamp())
    .execute(pool)
    .await
    .expect("Failed to add test member");

    member_id
}

/// Build a request with an optional bearer token and JSON body
pub fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
