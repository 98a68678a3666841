use crate::ApiError;

use track_core::{ModuleChange, ReviewStatus, WorkStatus};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Field-scoped module update. Only the fields present in the request
/// are applied; for nullable fields the double-Option distinguishes an
/// absent key (unchanged) from an explicit null (clear).
///
/// Dates are unix seconds.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateModuleRequest {
    #[serde(default)]
    pub module_name: Option<String>,

    #[serde(default)]
    pub platform_stack: Option<String>,

    #[serde(default)]
    pub assigned_dev_id: Option<Option<String>>,

    #[serde(default)]
    pub design_locked_date: Option<Option<i64>>,

    #[serde(default)]
    pub dev_start_date: Option<Option<i64>>,

    #[serde(default)]
    pub self_qa_date: Option<Option<i64>>,

    #[serde(default)]
    pub lead_signoff_date: Option<Option<i64>>,

    #[serde(default)]
    pub pm_review_date: Option<Option<i64>>,

    /// One of "pending", "approved", "rejected"
    #[serde(default)]
    pub cto_review_status: Option<String>,

    /// One of "pending", "approved", "rejected"
    #[serde(default)]
    pub client_ready_status: Option<String>,

    /// One of "not_started", "in_progress", "blocked", "done"
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub eta: Option<Option<i64>>,

    #[serde(default)]
    pub sprint: Option<String>,

    #[serde(default)]
    pub notes: Option<Option<String>>,
}

impl UpdateModuleRequest {
    /// Translate the request into typed per-field changes.
    pub fn changes(self) -> Result<Vec<ModuleChange>, ApiError> {
        let mut changes = Vec::new();

        if let Some(name) = self.module_name {
            if name.trim().is_empty() {
                return Err(ApiError::validation(
                    "module_name cannot be empty",
                    Some("module_name".into()),
                ));
            }
            changes.push(ModuleChange::ModuleName(name.trim().to_string()));
        }
        if let Some(stack) = self.platform_stack {
            changes.push(ModuleChange::PlatformStack(stack));
        }
        if let Some(dev) = self.assigned_dev_id {
            let dev = match dev {
                None => None,
                Some(s) => Some(parse_uuid_field(&s, "assigned_dev_id")?),
            };
            changes.push(ModuleChange::AssignedDev(dev));
        }
        if let Some(d) = self.design_locked_date {
            changes.push(ModuleChange::DesignLockedDate(parse_date_field(
                d,
                "design_locked_date",
            )?));
        }
        if let Some(d) = self.dev_start_date {
            changes.push(ModuleChange::DevStartDate(parse_date_field(
                d,
                "dev_start_date",
            )?));
        }
        if let Some(d) = self.self_qa_date {
            changes.push(ModuleChange::SelfQaDate(parse_date_field(d, "self_qa_date")?));
        }
        if let Some(d) = self.lead_signoff_date {
            changes.push(ModuleChange::LeadSignoffDate(parse_date_field(
                d,
                "lead_signoff_date",
            )?));
        }
        if let Some(d) = self.pm_review_date {
            changes.push(ModuleChange::PmReviewDate(parse_date_field(
                d,
                "pm_review_date",
            )?));
        }
        if let Some(s) = self.cto_review_status {
            changes.push(ModuleChange::CtoReviewStatus(ReviewStatus::from_str(&s)?));
        }
        if let Some(s) = self.client_ready_status {
            changes.push(ModuleChange::ClientReadyStatus(ReviewStatus::from_str(&s)?));
        }
        if let Some(s) = self.status {
            changes.push(ModuleChange::Status(WorkStatus::from_str(&s)?));
        }
        if let Some(d) = self.eta {
            changes.push(ModuleChange::Eta(parse_date_field(d, "eta")?));
        }
        if let Some(sprint) = self.sprint {
            changes.push(ModuleChange::Sprint(sprint));
        }
        if let Some(notes) = self.notes {
            changes.push(ModuleChange::Notes(notes));
        }

        Ok(changes)
    }
}

fn parse_uuid_field(s: &str, field: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(s)
        .map_err(|_| ApiError::validation(format!("{} is not a valid UUID", field), Some(field.into())))
}

fn parse_date_field(value: Option<i64>, field: &str) -> Result<Option<DateTime<Utc>>, ApiError> {
    match value {
        None => Ok(None),
        Some(secs) => DateTime::<Utc>::from_timestamp(secs, 0)
            .map(Some)
            .ok_or_else(|| {
                ApiError::validation(
                    format!("{} is out of range for a unix timestamp", field),
                    Some(field.into()),
                )
            }),
    }
}
