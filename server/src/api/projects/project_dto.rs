use track_core::Project;

use serde::Serialize;

/// Project DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct ProjectDto {
    pub id: String,
    pub title: String,
    pub stack: String,
    pub sprint: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Project> for ProjectDto {
    fn from(p: Project) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title,
            stack: p.stack,
            sprint: p.sprint,
            notes: p.notes,
            status: p.status.as_str().to_string(),
            created_by: p.created_by.to_string(),
            created_at: p.created_at.timestamp(),
            updated_at: p.updated_at.timestamp(),
        }
    }
}
