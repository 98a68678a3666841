use track_auth::{TokenService, hash_password};
use track_core::{Role, User};
use track_db::{CredentialRepository, UserRepository};
use track_server::{AppState, build_router, logger};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = track_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = track_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting track-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool (creates the file, sets pragmas, migrates)
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = track_db::create_pool(&database_path, 10).await?;
    info!("Database ready");

    bootstrap_admin(&pool, &config).await;

    // jwt_secret presence is guaranteed by validate()
    let secret = config
        .auth
        .jwt_secret
        .as_deref()
        .ok_or("auth.jwt_secret missing after validation")?;
    let tokens = Arc::new(TokenService::new(
        secret.as_bytes(),
        config.auth.token_ttl_secs(),
    ));

    let app = build_router(AppState { pool, tokens });

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown on Ctrl+C
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

/// Seed the first admin account when the instance is empty and the
/// config carries bootstrap credentials. Without it a fresh instance
/// would have no one able to create projects or assign roles.
async fn bootstrap_admin(pool: &sqlx::SqlitePool, config: &track_config::Config) {
    let (Some(email), Some(password)) = (
        config.auth.bootstrap_admin_email.as_deref(),
        config.auth.bootstrap_admin_password.as_deref(),
    ) else {
        return;
    };

    let users = UserRepository::new(pool.clone());
    match users.count().await {
        Ok(0) => {}
        Ok(_) => return,
        Err(e) => {
            warn!("Bootstrap admin check failed: {}", e);
            return;
        }
    }

    let name = config
        .auth
        .bootstrap_admin_name
        .as_deref()
        .unwrap_or("Administrator");

    let result = async {
        let auth_id = Uuid::new_v4();
        let password_hash = hash_password(password)?;
        CredentialRepository::new(pool.clone())
            .create(auth_id, email, &password_hash)
            .await?;
        let user = User::new(auth_id, name.to_string(), email.to_string(), Role::Admin);
        users.create(&user).await?;
        Ok::<_, track_server::error::ServerError>(())
    }
    .await;

    match result {
        Ok(()) => info!("Bootstrap admin created: {}", email),
        Err(e) => warn!("Failed to create bootstrap admin: {}", e),
    }
}
