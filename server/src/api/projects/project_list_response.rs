use crate::ProjectDto;

use serde::Serialize;

/// Envelope for project listings: only the rows the actor may read,
/// per the visibility policy.
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectDto>,
}
