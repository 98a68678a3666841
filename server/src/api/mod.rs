pub mod auth;
pub mod delete_response;
pub mod error;
pub mod extractors;
pub mod members;
pub mod modules;
pub mod projects;
pub mod users;
