pub mod credential_repository;
pub mod module_repository;
pub mod project_member_repository;
pub mod project_repository;
pub mod user_repository;
