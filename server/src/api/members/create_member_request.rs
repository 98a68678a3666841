use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub user_id: String,

    /// Free-text label for the member's role on this project
    #[serde(default)]
    pub role_in_project: Option<String>,
}
