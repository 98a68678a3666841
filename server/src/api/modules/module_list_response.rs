use crate::ModuleDto;
use serde::Serialize;

/// List of modules response
#[derive(Debug, Serialize)]
pub struct ModuleListResponse {
    pub modules: Vec<ModuleDto>,
}
