use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateModuleRequest {
    pub module_name: String,

    #[serde(default)]
    pub platform_stack: Option<String>,

    #[serde(default)]
    pub sprint: Option<String>,

    #[serde(default)]
    pub assigned_dev_id: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}
