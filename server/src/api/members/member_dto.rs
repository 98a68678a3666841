use track_core::ProjectMember;

use serde::Serialize;

/// Project member DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct MemberDto {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub role_in_project: String,
    pub created_at: i64,
}

impl From<ProjectMember> for MemberDto {
    fn from(m: ProjectMember) -> Self {
        Self {
            id: m.id.to_string(),
            project_id: m.project_id.to_string(),
            user_id: m.user_id.to_string(),
            role_in_project: m.role_in_project,
            created_at: m.created_at.timestamp(),
        }
    }
}
