//! Integration tests for project membership handlers
mod common;

use crate::common::{add_test_member, create_test_project, create_test_state, create_user, request};

use track_core::Role;
use track_server::build_router;

use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_add_member_as_admin() {
    let state = create_test_state().await;
    let (admin, token) = create_user(&state, "Admin", Role::Admin).await;
    let (dev, _) = create_user(&state, "Dev", Role::Dev).await;
    let project_id = create_test_project(&state.pool, admin.id, "Gateway").await;

    let app = build_router(state.clone());
    let response = app
        .oneshot(request(
            "POST",
            &format!("/api/v1/projects/{}/members", project_id),
            Some(&token),
            Some(json!({ "user_id": dev.id.to_string(), "role_in_project": "backend" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["user_id"], dev.id.to_string());
    assert_eq!(json["role_in_project"], "backend");
}

#[tokio::test]
async fn test_add_member_defaults_role_label_to_global_role() {
    let state = create_test_state().await;
    let (admin, token) = create_user(&state, "Admin", Role::Admin).await;
    let (lead, _) = create_user(&state, "Lead", Role::Lead).await;
    let project_id = create_test_project(&state.pool, admin.id, "Gateway").await;

    let app = build_router(state.clone());
    let response = app
        .oneshot(request(
            "POST",
            &format!("/api/v1/projects/{}/members", project_id),
            Some(&token),
            Some(json!({ "user_id": lead.id.to_string() })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["role_in_project"], "lead");
}

#[tokio::test]
async fn test_add_member_as_pm_forbidden() {
    let state = create_test_state().await;
    let (admin, _) = create_user(&state, "Admin", Role::Admin).await;
    let (_pm, token) = create_user(&state, "Pm", Role::Pm).await;
    let (dev, _) = create_user(&state, "Dev", Role::Dev).await;
    let project_id = create_test_project(&state.pool, admin.id, "Gateway").await;

    let app = build_router(state.clone());
    let response = app
        .oneshot(request(
            "POST",
            &format!("/api/v1/projects/{}/members", project_id),
            Some(&token),
            Some(json!({ "user_id": dev.id.to_string() })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_add_member_twice_conflicts() {
    let state = create_test_state().await;
    let (admin, token) = create_user(&state, "Admin", Role::Admin).await;
    let (dev, _) = create_user(&state, "Dev", Role::Dev).await;
    let project_id = create_test_project(&state.pool, admin.id, "Gateway").await;
    add_test_member(&state.pool, project_id, dev.id).await;

    let app = build_router(state.clone());
    let response = app
        .oneshot(request(
            "POST",
            &format!("/api/v1/projects/{}/members", project_id),
            Some(&token),
            Some(json!({ "user_id": dev.id.to_string() })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_add_member_unknown_user_not_found() {
    let state = create_test_state().await;
    let (admin, token) = create_user(&state, "Admin", Role::Admin).await;
    let project_id = create_test_project(&state.pool, admin.id, "Gateway").await;

    let app = build_router(state.clone());
    let response = app
        .oneshot(request(
            "POST",
            &format!("/api/v1/projects/{}/members", project_id),
            Some(&token),
            Some(json!({ "user_id": Uuid::new_v4().to_string() })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_members_requires_project_visibility() {
    let state = create_test_state().await;
    let (admin, _) = create_user(&state, "Admin", Role::Admin).await;
    let (member, member_token) = create_user(&state, "Member", Role::Dev).await;
    let (_outsider, outsider_token) = create_user(&state, "Outsider", Role::Dev).await;
    let project_id = create_test_project(&state.pool, admin.id, "Gateway").await;
    add_test_member(&state.pool, project_id, member.id).await;

    let app = build_router(state.clone());

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/v1/projects/{}/members", project_id),
            Some(&member_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["members"].as_array().unwrap().len(), 1);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/v1/projects/{}/members", project_id),
            Some(&outsider_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_remove_member_as_admin() {
    let state = create_test_state().await;
    let (admin, token) = create_user(&state, "Admin", Role::Admin).await;
    let (dev, _) = create_user(&state, "Dev", Role::Dev).await;
    let project_id = create_test_project(&state.pool, admin.id, "Gateway").await;
    let member_id = add_test_member(&state.pool, project_id, dev.id).await;

    let app = build_router(state.clone());
    let response = app
        .oneshot(request(
            "DELETE",
            &format!("/api/v1/members/{}", member_id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM project_members")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_remove_member_as_dev_forbidden() {
    let state = create_test_state().await;
    let (admin, _) = create_user(&state, "Admin", Role::Admin).await;
    let (dev, token) = create_user(&state, "Dev", Role::Dev).await;
    let project_id = create_test_project(&state.pool, admin.id, "Gateway").await;
    let member_id = add_test_member(&state.pool, project_id, dev.id).await;

    let app = build_router(state.clone());
    let response = app
        .oneshot(request(
            "DELETE",
            &format!("/api/v1/members/{}", member_id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
