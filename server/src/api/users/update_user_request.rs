use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,

    /// Double-Option: absent = unchanged, null = clear
    #[serde(default)]
    pub avatar_url: Option<Option<String>>,

    /// One of the six assignable roles; admin-only
    #[serde(default)]
    pub role: Option<String>,
}
