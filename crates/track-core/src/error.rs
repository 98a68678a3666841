use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid role: {value} {location}")]
    InvalidRole {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid work status: {value} {location}")]
    InvalidWorkStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid review status: {value} {location}")]
    InvalidReviewStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid module field: {value} {location}")]
    InvalidModuleField {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
