//! Axum extractors for REST API authentication

use crate::ApiError;
use crate::state::AppState;

use track_core::User;
use track_db::UserRepository;

use std::future::Future;

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use uuid::Uuid;

/// The authenticated user making the request.
///
/// Resolves the `Authorization: Bearer <token>` header to a full user
/// profile. The profile (and with it the role) is loaded fresh on every
/// request, so a role change takes effect on the next call without
/// waiting for the token to expire.
pub struct Actor(pub User);

impl FromRequestParts<AppState> for Actor {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header_value = parts
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

            let token = header_value
                .strip_prefix("Bearer ")
                .ok_or_else(|| ApiError::unauthorized("Authorization header must be a Bearer token"))?;

            let claims = state.tokens.validate(token)?;

            let auth_id = Uuid::parse_str(&claims.sub)
                .map_err(|_| ApiError::unauthorized("Token subject is not a valid identity"))?;

            let repo = UserRepository::new(state.pool.clone());
            let user = repo
                .find_by_auth_id(auth_id)
                .await?
                .ok_or_else(|| ApiError::unauthorized("No account for this identity"))?;

            Ok(Actor(user))
        }
    }
}
