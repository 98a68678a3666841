use crate::UserDto;

use serde::Serialize;

/// Session token plus the profile it belongs to
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDto,
}
