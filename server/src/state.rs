use track_auth::TokenService;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tokens: Arc<TokenService>,
}
