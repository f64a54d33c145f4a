pub mod error;
pub mod extractors;
pub mod local;
pub mod message_response;
pub mod oauth;
pub mod tokens;
