use crate::ProjectDto;

use serde::Serialize;

/// Envelope for a single project record.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub project: ProjectDto,
}
