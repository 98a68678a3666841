//! Integration tests for signup and login
mod common;

use crate::common::{create_test_state, create_user, request};

use track_core::Role;
use track_server::build_router;

use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_signup_creates_account_and_returns_token() {
    let state = create_test_state().await;
    let app = build_router(state.clone());

    let req = request(
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "name": "Ada",
            "email": "ada@test.local",
            "password": "correct-horse",
        })),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(!json["token"].as_str().unwrap().is_empty());
    assert_eq!(json["user"]["name"], "Ada");
    assert_eq!(json["user"]["email"], "ada@test.local");
    // Default role is dev
    assert_eq!(json["user"]["role"], "dev");
}

#[tokio::test]
async fn test_signup_token_works_for_authenticated_requests() {
    let state = create_test_state().await;
    let app = build_router(state.clone());

    let req = request(
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "name": "Ada",
            "email": "ada@test.local",
            "password": "correct-horse",
        })),
    );
    let response = app.clone().oneshot(req).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let token = json["token"].as_str().unwrap().to_string();

    let response = app
        .oneshot(request("GET", "/api/v1/users", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_signup_with_role_designer() {
    let state = create_test_state().await;
    let app = build_router(state.clone());

    let req = request(
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "name": "Mia",
            "email": "mia@test.local",
            "password": "correct-horse",
            "role": "designer",
        })),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["user"]["role"], "designer");
}

#[tokio::test]
async fn test_signup_admin_role_rejected() {
    let state = create_test_state().await;
    let app = build_router(state.clone());

    let req = request(
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "name": "Eve",
            "email": "eve@test.local",
            "password": "correct-horse",
            "role": "admin",
        })),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "role");
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let state = create_test_state().await;
    let app = build_router(state.clone());

    let body = json!({
        "name": "Ada",
        "email": "ada@test.local",
        "password": "correct-horse",
    });

    let response = app
        .clone()
        .oneshot(request("POST", "/api/v1/auth/signup", None, Some(body.clone())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request("POST", "/api/v1/auth/signup", None, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_short_password_rejected() {
    let state = create_test_state().await;
    let app = build_router(state.clone());

    let req = request(
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "name": "Ada",
            "email": "ada@test.local",
            "password": "short",
        })),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_roundtrip() {
    let state = create_test_state().await;
    let app = build_router(state.clone());

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/auth/signup",
            None,
            Some(json!({
                "name": "Ada",
                "email": "ada@test.local",
                "password": "correct-horse",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({
                "email": "ada@test.local",
                "password": "correct-horse",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(!json["token"].as_str().unwrap().is_empty());
    assert_eq!(json["user"]["email"], "ada@test.local");
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let state = create_test_state().await;
    let app = build_router(state.clone());

    app.clone()
        .oneshot(request(
            "POST",
            "/api/v1/auth/signup",
            None,
            Some(json!({
                "name": "Ada",
                "email": "ada@test.local",
                "password": "correct-horse",
            })),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({
                "email": "ada@test.local",
                "password": "wrong-horse",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_login_unknown_email_unauthorized() {
    let state = create_test_state().await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({
                "email": "ghost@test.local",
                "password": "correct-horse",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_token_unauthorized() {
    let state = create_test_state().await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(request("GET", "/api/v1/projects", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_unauthorized() {
    let state = create_test_state().await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(request(
            "GET",
            "/api/v1/projects",
            Some("not-a-real-token"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_deleted_account_unauthorized() {
    let state = create_test_state().await;
    let (user, token) = create_user(&state, "Ada", Role::Dev).await;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user.id.to_string())
        .execute(&state.pool)
        .await
        .unwrap();

    let app = build_router(state.clone());
    let response = app
        .oneshot(request("GET", "/api/v1/projects", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
