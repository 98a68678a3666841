pub mod module;
pub mod module_field;
pub mod project;
pub mod project_member;
pub mod review_status;
pub mod role;
pub mod user;
pub mod work_status;
