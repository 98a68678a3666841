use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Membership link between a user and a project.
///
/// `(project_id, user_id)` is unique. The link is what grants project
/// visibility to roles outside the privileged reader set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    /// Free-text label describing the member's function within the project
    pub role_in_project: String,
    pub created_at: DateTime<Utc>,
}

impl ProjectMember {
    pub fn new(project_id: Uuid, user_id: Uuid, role_in_project: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            user_id,
            role_in_project: role_in_project.to_string(),
            created_at: Utc::now(),
        }
    }
}
