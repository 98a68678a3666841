use serde::Deserialize;

/// Query filters for module listings. All filters are optional and
/// combine with AND.
#[derive(Debug, Deserialize, Default)]
pub struct ListModulesQuery {
    /// Filter on workflow status (e.g. "in_progress")
    #[serde(default)]
    pub status: Option<String>,

    /// Exact sprint label
    #[serde(default)]
    pub sprint: Option<String>,

    /// Case-insensitive substring match on module name
    #[serde(default)]
    pub q: Option<String>,
}
