use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] track_config::ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] track_db::DbError),

    #[error("Auth error: {0}")]
    Auth(#[from] track_auth::AuthError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
