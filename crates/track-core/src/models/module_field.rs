//! The editable fields of a module and their per-role update grants.
//!
//! This table is the single source of truth for field-level authorization.
//! The policy functions in [`crate::policy`] and the store-side guards in
//! track-db both read it, so the two enforcement points cannot drift.

use crate::{CoreError, Result as CoreErrorResult, Role};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleField {
    ModuleName,
    PlatformStack,
    AssignedDev,
    DesignLockedDate,
    DevStartDate,
    SelfQaDate,
    LeadSignoffDate,
    PmReviewDate,
    CtoReviewStatus,
    ClientReadyStatus,
    Status,
    Eta,
    Sprint,
    Notes,
}

impl ModuleField {
    /// Every editable field, for exhaustive policy checks.
    pub const ALL: [ModuleField; 14] = [
        Self::ModuleName,
        Self::PlatformStack,
        Self::AssignedDev,
        Self::DesignLockedDate,
        Self::DevStartDate,
        Self::SelfQaDate,
        Self::LeadSignoffDate,
        Self::PmReviewDate,
        Self::CtoReviewStatus,
        Self::ClientReadyStatus,
        Self::Status,
        Self::Eta,
        Self::Sprint,
        Self::Notes,
    ];

    /// Global roles allowed to update this field.
    ///
    /// Fields map 1:1 onto workflow stages; gating by role enforces
    /// separation of duties (a developer cannot self-approve CTO signoff).
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::ModuleName | Self::PlatformStack | Self::AssignedDev => &[Role::Admin],
            Self::DesignLockedDate => &[Role::Designer, Role::Admin],
            // The dev-side milestones belong to the assignee, not devs at
            // large; see allows_assignee
            Self::DevStartDate | Self::SelfQaDate => &[Role::Admin],
            Self::LeadSignoffDate => &[Role::Lead, Role::Admin],
            Self::PmReviewDate | Self::ClientReadyStatus | Self::Eta | Self::Sprint => {
                &[Role::Pm, Role::Admin]
            }
            Self::CtoReviewStatus => &[Role::Cto, Role::Admin],
            Self::Status => &[Role::Dev, Role::Pm, Role::Admin],
            Self::Notes => &[
                Role::Admin,
                Role::Dev,
                Role::Pm,
                Role::Cto,
                Role::Lead,
                Role::Designer,
            ],
        }
    }

    /// Whether the module's assigned developer may update this field
    /// regardless of global role. The assignee must be able to timestamp
    /// their own progress.
    pub fn allows_assignee(&self) -> bool {
        matches!(self, Self::DevStartDate | Self::SelfQaDate)
    }

    /// Column name in the store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModuleName => "module_name",
            Self::PlatformStack => "platform_stack",
            Self::AssignedDev => "assigned_dev_id",
            Self::DesignLockedDate => "design_locked_date",
            Self::DevStartDate => "dev_start_date",
            Self::SelfQaDate => "self_qa_date",
            Self::LeadSignoffDate => "lead_signoff_date",
            Self::PmReviewDate => "pm_review_date",
            Self::CtoReviewStatus => "cto_review_status",
            Self::ClientReadyStatus => "client_ready_status",
            Self::Status => "status",
            Self::Eta => "eta",
            Self::Sprint => "sprint",
            Self::Notes => "notes",
        }
    }
}

impl FromStr for ModuleField {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "module_name" => Ok(Self::ModuleName),
            "platform_stack" => Ok(Self::PlatformStack),
            "assigned_dev_id" => Ok(Self::AssignedDev),
            "design_locked_date" => Ok(Self::DesignLockedDate),
            "dev_start_date" => Ok(Self::DevStartDate),
            "self_qa_date" => Ok(Self::SelfQaDate),
            "lead_signoff_date" => Ok(Self::LeadSignoffDate),
            "pm_review_date" => Ok(Self::PmReviewDate),
            "cto_review_status" => Ok(Self::CtoReviewStatus),
            "client_ready_status" => Ok(Self::ClientReadyStatus),
            "status" => Ok(Self::Status),
            "eta" => Ok(Self::Eta),
            "sprint" => Ok(Self::Sprint),
            "notes" => Ok(Self::Notes),
            _ => Err(CoreError::InvalidModuleField {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for ModuleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
