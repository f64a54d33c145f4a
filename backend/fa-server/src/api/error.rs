//! REST API error types
//!
//! Every failure of a direct API call becomes a flat JSON body
//! `{"error": ..., "message"?: ...}` with a matching status code.

use fa_auth::AuthError;
use fa_db::DbError;
use fa_linking::LinkError;
use fa_providers::ProviderError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const DUPLICATE_ACCOUNT_MESSAGE: &str = "User already exists";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Human-readable error for plain failures, machine code for token failures
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing fields, duplicate registration (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Local login failed; same answer for unknown email and wrong password (401)
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    /// Bearer token missing, expired or invalid (401)
    #[error("Token rejected ({code}): {message} {location}")]
    Token {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// Unknown provider or subject without a record (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Identity store unreachable (503)
    #[error("Service unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials { .. } | Self::Token { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let body = match self {
            ApiError::BadRequest { message, .. } | ApiError::NotFound { message, .. } => {
                ApiErrorBody {
                    error: message,
                    message: None,
                }
            }
            ApiError::InvalidCredentials { .. } => ApiErrorBody {
                error: INVALID_CREDENTIALS_MESSAGE.to_string(),
                message: None,
            },
            ApiError::Token { code, message, .. } => ApiErrorBody {
                error: code.to_string(),
                message: Some(message),
            },
            // Internal details stay in the log
            ApiError::Unavailable { .. } => ApiErrorBody {
                error: "Service temporarily unavailable".to_string(),
                message: None,
            },
            ApiError::Internal { .. } => ApiErrorBody {
                error: "Internal server error".to_string(),
                message: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Token failures keep expiry distinct from every other rejection
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if matches!(e, AuthError::TokenExpired { .. }) {
            return ApiError::Token {
                code: "token_expired",
                message: "The access token has expired".to_string(),
                location,
            };
        }
        if e.is_missing_credentials() {
            return ApiError::Token {
                code: "authorization_required",
                message: "Request does not contain a bearer token".to_string(),
                location,
            };
        }
        if e.is_invalid_token() {
            log::debug!("Token rejected: {}", e);
            return ApiError::Token {
                code: "invalid_token",
                message: "Signature verification failed".to_string(),
                location,
            };
        }

        ApiError::Internal {
            message: e.to_string(),
            location,
        }
    }
}

impl From<ProviderError> for ApiError {
    #[track_caller]
    fn from(e: ProviderError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            ProviderError::DuplicateAccount { .. } => ApiError::BadRequest {
                message: DUPLICATE_ACCOUNT_MESSAGE.to_string(),
                location,
            },
            ProviderError::InvalidCredentials { .. } => ApiError::InvalidCredentials { location },
            ProviderError::StoreUnavailable { message, .. } => {
                ApiError::Unavailable { message, location }
            }
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<LinkError> for ApiError {
    #[track_caller]
    fn from(e: LinkError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            LinkError::DuplicateAccount { .. } => ApiError::BadRequest {
                message: DUPLICATE_ACCOUNT_MESSAGE.to_string(),
                location,
            },
            LinkError::StoreUnavailable { message, .. } => {
                ApiError::Unavailable { message, location }
            }
            conflict @ LinkError::StoreConflict { .. } => ApiError::Unavailable {
                message: conflict.to_string(),
                location,
            },
        }
    }
}

impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        ApiError::Unavailable {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
