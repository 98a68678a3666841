pub mod connection;
pub mod error;
pub mod repositories;

mod row;

pub use connection::create_pool;
pub use error::{DbError, Result};
pub use repositories::credential_repository::{Credential, CredentialRepository};
pub use repositories::module_repository::ModuleRepository;
pub use repositories::project_member_repository::ProjectMemberRepository;
pub use repositories::project_repository::ProjectRepository;
pub use repositories::user_repository::UserRepository;
