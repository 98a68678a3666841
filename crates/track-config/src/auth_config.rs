use crate::{ConfigError, ConfigErrorResult, DEFAULT_TOKEN_TTL_SECS};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret for session tokens. Required; startup fails without it.
    pub jwt_secret: Option<String>,
    pub token_ttl_secs: Option<i64>,
    /// Seeded on first startup when the users table is empty
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_password: Option<String>,
    pub bootstrap_admin_name: Option<String>,
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match &self.jwt_secret {
            None => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (set it in config.toml or TRACK_AUTH_JWT_SECRET)",
                ));
            }
            Some(secret) if secret.len() < 16 => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret must be at least 16 bytes",
                ));
            }
            Some(_) => {}
        }

        if self.token_ttl_secs() <= 0 {
            return Err(ConfigError::auth(format!(
                "auth.token_ttl_secs must be positive, got {}",
                self.token_ttl_secs()
            )));
        }

        // Bootstrap credentials come as a pair or not at all
        if self.bootstrap_admin_email.is_some() != self.bootstrap_admin_password.is_some() {
            return Err(ConfigError::auth(
                "auth.bootstrap_admin_email and auth.bootstrap_admin_password must be set together",
            ));
        }

        Ok(())
    }

    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS)
    }
}
