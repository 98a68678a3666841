pub mod error;
pub mod models;
pub mod policy;


pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::module::{Module, ModuleChange};
pub use models::module_field::ModuleField;
pub use models::project::{Project, ProjectChange};
pub use models::project_member::ProjectMember;
pub use models::review_status::ReviewStatus;
pub use models::role::Role;
pub use models::user::User;
pub use models::work_status::WorkStatus;
