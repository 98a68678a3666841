//! Project entity - organizational container for modules.

use crate::WorkStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project is a top-level organizational container. Modules belong to
/// exactly one project and are cascade-deleted with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    /// Free-text description of the tech stack
    pub stack: String,
    /// Sprint label (free text, e.g. "2026-S3")
    pub sprint: String,
    pub notes: Option<String>,
    pub status: WorkStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project with default values
    pub fn new(title: String, stack: String, sprint: String, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            stack,
            sprint,
            notes: None,
            status: WorkStatus::NotStarted,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A single-field change to a project. Updates are issued per column so
/// concurrent editors cannot clobber each other's unseen fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectChange {
    Title(String),
    Stack(String),
    Sprint(String),
    Notes(Option<String>),
    Status(WorkStatus),
}
