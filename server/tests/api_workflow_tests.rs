//! End-to-end walk through a module's workflow: project setup, per-role
//! milestone writes, review gates, and the denials along the way.
mod common;

use crate::common::{create_test_state, create_user, request};

use track_core::Role;
use track_server::build_router;

use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_module_lifecycle_across_roles() {
    let state = create_test_state().await;
    let (_admin, admin_token) = create_user(&state, "Admin", Role::Admin).await;
    let (_pm, pm_token) = create_user(&state, "Pm", Role::Pm).await;
    let (_cto, cto_token) = create_user(&state, "Cto", Role::Cto).await;
    let (dev, dev_token) = create_user(&state, "Dev", Role::Dev).await;
    let (_other, other_token) = create_user(&state, "Other", Role::Dev).await;
    let app = build_router(state.clone());

    // Admin creates the project
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/projects",
            Some(&admin_token),
            Some(json!({ "title": "Gateway", "stack": "Rust/Axum", "sprint": "2026-S3" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let project_id = body_json(response).await["project"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Admin adds a module and assigns the dev
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/v1/projects/{}/modules", project_id),
            Some(&admin_token),
            Some(json!({ "module_name": "Auth Service", "platform_stack": "Rust" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let module_id = body_json(response).await["module"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/v1/modules/{}", module_id),
            Some(&admin_token),
            Some(json!({ "assigned_dev_id": dev.id.to_string() })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // PM plans: eta and sprint are theirs to set
    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/v1/modules/{}", module_id),
            Some(&pm_token),
            Some(json!({ "eta": 1790000000_i64, "sprint": "2026-S4" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // ...but the CTO gate is not
    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/v1/modules/{}", module_id),
            Some(&pm_token),
            Some(json!({ "cto_review_status": "approved" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"]["field"],
        "cto_review_status"
    );

    // The assigned dev starts work; an unrelated dev cannot
    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/v1/modules/{}", module_id),
            Some(&dev_token),
            Some(json!({ "dev_start_date": 1780000000_i64, "status": "in_progress" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/v1/modules/{}", module_id),
            Some(&other_token),
            Some(json!({ "self_qa_date": 1781000000_i64 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // CTO approves their gate
    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/v1/modules/{}", module_id),
            Some(&cto_token),
            Some(json!({ "cto_review_status": "approved" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Final state reflects every accepted write and nothing else
    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/v1/modules/{}", module_id),
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let module = body_json(response).await["module"].clone();

    assert_eq!(module["assigned_dev_id"], dev.id.to_string());
    assert_eq!(module["eta"], 1790000000_i64);
    assert_eq!(module["sprint"], "2026-S4");
    assert_eq!(module["dev_start_date"], 1780000000_i64);
    assert_eq!(module["status"], "in_progress");
    assert_eq!(module["cto_review_status"], "approved");
    assert_eq!(module["client_ready_status"], "pending");
    assert!(module["self_qa_date"].is_null());
}
