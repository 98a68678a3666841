use track_core::Module;

use serde::Serialize;

/// Module DTO for JSON serialization. Dates are unix seconds.
#[derive(Debug, Serialize)]
pub struct ModuleDto {
    pub id: String,
    pub project_id: String,
    pub module_name: String,
    pub platform_stack: String,
    pub assigned_dev_id: Option<String>,

    pub design_locked_date: Option<i64>,
    pub dev_start_date: Option<i64>,
    pub self_qa_date: Option<i64>,
    pub lead_signoff_date: Option<i64>,
    pub pm_review_date: Option<i64>,

    pub cto_review_status: String,
    pub client_ready_status: String,

    pub status: String,
    pub eta: Option<i64>,
    pub sprint: String,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Module> for ModuleDto {
    fn from(m: Module) -> Self {
        Self {
            id: m.id.to_string(),
            project_id: m.project_id.to_string(),
            module_name: m.module_name,
            platform_stack: m.platform_stack,
            assigned_dev_id: m.assigned_dev_id.map(|id| id.to_string()),
            design_locked_date: m.design_locked_date.map(|d| d.timestamp()),
            dev_start_date: m.dev_start_date.map(|d| d.timestamp()),
            self_qa_date: m.self_qa_date.map(|d| d.timestamp()),
            lead_signoff_date: m.lead_signoff_date.map(|d| d.timestamp()),
            pm_review_date: m.pm_review_date.map(|d| d.timestamp()),
            cto_review_status: m.cto_review_status.as_str().to_string(),
            client_ready_status: m.client_ready_status.as_str().to_string(),
            status: m.status.as_str().to_string(),
            eta: m.eta.map(|d| d.timestamp()),
            sprint: m.sprint,
            notes: m.notes,
            created_at: m.created_at.timestamp(),
            updated_at: m.updated_at.timestamp(),
        }
    }
}
