use crate::ModuleDto;
use serde::Serialize;

/// Single module response
#[derive(Debug, Serialize)]
pub struct ModuleResponse {
    pub module: ModuleDto,
}
