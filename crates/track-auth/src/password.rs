//! bcrypt wrappers for stored credentials.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use bcrypt::{DEFAULT_COST, hash, verify};
use error_location::ErrorLocation;

#[track_caller]
pub fn hash_password(password: &str) -> AuthErrorResult<String> {
    hash(password, DEFAULT_COST).map_err(|source| AuthError::Hash {
        source,
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Check a candidate password against a stored hash. A mismatch is `Ok(false)`;
/// only a malformed hash is an error.
#[track_caller]
pub fn verify_password(password: &str, stored_hash: &str) -> AuthErrorResult<bool> {
    verify(password, stored_hash).map_err(|source| AuthError::Hash {
        source,
        location: ErrorLocation::from(Location::caller()),
    })
}
