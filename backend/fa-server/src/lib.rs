pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::bearer_token::{AuthenticatedUser, bearer_token},
    local::{
        local::{login, register},
        login_request::LoginRequest,
        login_response::LoginResponse,
        register_request::RegisterRequest,
    },
    message_response::MessageResponse,
    oauth::{
        callback_query::CallbackQuery,
        oauth::{authorize_redirect, callback},
    },
    tokens::{
        protected_response::ProtectedResponse,
        refresh_request::RefreshRequest,
        refresh_response::RefreshResponse,
        tokens::{protected, refresh},
    },
};
pub use app_state::AppState;
pub use error::{Result as ServerResult, ServerError};

pub use crate::routes::build_router;
