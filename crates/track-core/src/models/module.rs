//! Module entity - a unit of work moving through the fixed workflow
//! (design → development → QA → lead signoff → PM review → CTO/client
//! approval). Each workflow stage owns one field; see
//! [`crate::ModuleField`] for who may write what.

use crate::{ModuleField, ReviewStatus, WorkStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: Uuid,
    pub project_id: Uuid,
    pub module_name: String,
    pub platform_stack: String,
    pub assigned_dev_id: Option<Uuid>,

    // Milestones, timestamped by the role owning each stage
    pub design_locked_date: Option<DateTime<Utc>>,
    pub dev_start_date: Option<DateTime<Utc>>,
    pub self_qa_date: Option<DateTime<Utc>>,
    pub lead_signoff_date: Option<DateTime<Utc>>,
    pub pm_review_date: Option<DateTime<Utc>>,

    // Review gates, independent of each other and of the overall status
    pub cto_review_status: ReviewStatus,
    pub client_ready_status: ReviewStatus,

    pub status: WorkStatus,
    pub eta: Option<DateTime<Utc>>,
    pub sprint: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Module {
    /// Create a new module with default values
    pub fn new(project_id: Uuid, module_name: String, platform_stack: String, sprint: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            module_name,
            platform_stack,
            assigned_dev_id: None,
            design_locked_date: None,
            dev_start_date: None,
            self_qa_date: None,
            lead_signoff_date: None,
            pm_review_date: None,
            cto_review_status: ReviewStatus::Pending,
            client_ready_status: ReviewStatus::Pending,
            status: WorkStatus::NotStarted,
            eta: None,
            sprint,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_assigned_to(&self, user_id: Uuid) -> bool {
        self.assigned_dev_id == Some(user_id)
    }
}

/// A single-field change to a module, carrying the typed new value.
///
/// Updates are issued per column; a full-record write would let two
/// concurrent editors silently overwrite each other's unseen fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleChange {
    ModuleName(String),
    PlatformStack(String),
    AssignedDev(Option<Uuid>),
    DesignLockedDate(Option<DateTime<Utc>>),
    DevStartDate(Option<DateTime<Utc>>),
    SelfQaDate(Option<DateTime<Utc>>),
    LeadSignoffDate(Option<DateTime<Utc>>),
    PmReviewDate(Option<DateTime<Utc>>),
    CtoReviewStatus(ReviewStatus),
    ClientReadyStatus(ReviewStatus),
    Status(WorkStatus),
    Eta(Option<DateTime<Utc>>),
    Sprint(String),
    Notes(Option<String>),
}

impl ModuleChange {
    /// The field this change writes, for policy lookup.
    pub fn field(&self) -> ModuleField {
        match self {
            Self::ModuleName(_) => ModuleField::ModuleName,
            Self::PlatformStack(_) => ModuleField::PlatformStack,
            Self::AssignedDev(_) => ModuleField::AssignedDev,
            Self::DesignLockedDate(_) => ModuleField::DesignLockedDate,
            Self::DevStartDate(_) => ModuleField::DevStartDate,
            Self::SelfQaDate(_) => ModuleField::SelfQaDate,
            Self::LeadSignoffDate(_) => ModuleField::LeadSignoffDate,
            Self::PmReviewDate(_) => ModuleField::PmReviewDate,
            Self::CtoReviewStatus(_) => ModuleField::CtoReviewStatus,
            Self::ClientReadyStatus(_) => ModuleField::ClientReadyStatus,
            Self::Status(_) => ModuleField::Status,
            Self::Eta(_) => ModuleField::Eta,
            Self::Sprint(_) => ModuleField::Sprint,
            Self::Notes(_) => ModuleField::Notes,
        }
    }
}
