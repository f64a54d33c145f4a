pub mod local;
pub mod login_request;
pub mod login_response;
pub mod register_request;
