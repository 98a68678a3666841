pub mod create_module_request;
pub mod list_modules_query;
pub mod module_dto;
pub mod module_list_response;
pub mod module_response;
pub mod modules;
pub mod update_module_request;
