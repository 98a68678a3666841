use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,

    #[serde(default)]
    pub stack: Option<String>,

    #[serde(default)]
    pub sprint: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}
