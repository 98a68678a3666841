use crate::MemberDto;
use serde::Serialize;

/// List of project members response
#[derive(Debug, Serialize)]
pub struct MemberListResponse {
    pub members: Vec<MemberDto>,
}
