pub mod protected_response;
pub mod refresh_request;
pub mod refresh_response;
pub mod tokens;
