use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub stack: Option<String>,

    #[serde(default)]
    pub sprint: Option<String>,

    /// Double-Option: absent = unchanged, null = clear
    #[serde(default)]
    pub notes: Option<Option<String>>,

    /// One of "not_started", "in_progress", "blocked", "done"
    #[serde(default)]
    pub status: Option<String>,
}
