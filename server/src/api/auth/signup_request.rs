use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,

    /// Optional role; defaults to "dev". "admin" is rejected - admin
    /// accounts come from bootstrap seeding or an existing admin.
    #[serde(default)]
    pub role: Option<String>,
}
