//! Signup and login handlers
//!
//! Credentials live in their own table keyed by `auth_id`; the profile
//! row references the same id. Tokens carry only the auth identity, so
//! role changes never require re-login.

use crate::state::AppState;
use crate::{ApiError, ApiResult, AuthResponse, LoginRequest, SignupRequest, UserDto};

use track_auth::{hash_password, verify_password};
use track_core::{Role, User};
use track_db::{CredentialRepository, UserRepository};

use std::str::FromStr;

use axum::{Json, extract::State};
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 8;

/// POST /api/v1/auth/signup
///
/// Create a credential and profile, then log straight in.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation(
            "name cannot be empty",
            Some("name".into()),
        ));
    }

    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::validation(
            "a valid email address is required",
            Some("email".into()),
        ));
    }

    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(
            format!("password must be at least {} characters", MIN_PASSWORD_LEN),
            Some("password".into()),
        ));
    }

    let role = match req.role.as_deref() {
        None => Role::Dev,
        Some(s) => {
            let role = Role::from_str(s)?;
            if role == Role::Admin {
                return Err(ApiError::validation(
                    "the admin role cannot be self-assigned",
                    Some("role".into()),
                ));
            }
            role
        }
    };

    let credentials = CredentialRepository::new(state.pool.clone());
    if credentials.find_by_email(&email).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "an account for {} already exists",
            email
        )));
    }

    let auth_id = Uuid::new_v4();
    let password_hash = hash_password(&req.password)?;
    credentials.create(auth_id, &email, &password_hash).await?;

    let user = User::new(auth_id, name.to_string(), email, role);
    let users = UserRepository::new(state.pool.clone());
    users.create(&user).await?;

    log::info!("New account: {} ({})", user.email, user.role);

    let token = state.tokens.issue(auth_id)?;

    Ok(Json(AuthResponse {
        token,
        user: UserDto::from(user),
    }))
}

/// POST /api/v1/auth/login
///
/// Verify credentials and issue a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let email = req.email.trim().to_lowercase();

    let credentials = CredentialRepository::new(state.pool.clone());
    let credential = credentials
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !verify_password(&req.password, &credential.password_hash)? {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_auth_id(credential.auth_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("No account for this identity"))?;

    let token = state.tokens.issue(credential.auth_id)?;

    Ok(Json(AuthResponse {
        token,
        user: UserDto::from(user),
    }))
}
