use crate::TokenType;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("JWT encode failed: {source} {location}")]
    JwtEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Wrong token type: expected {expected}, got {actual} {location}")]
    WrongTokenType {
        expected: TokenType,
        actual: TokenType,
        location: ErrorLocation,
    },

    #[error("Invalid signing key: {message} {location}")]
    InvalidKey {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::JwtDecode { .. } => "JWT_DECODE_FAILED",
            Self::JwtEncode { .. } => "JWT_ENCODE_FAILED",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
            Self::WrongTokenType { .. } => "WRONG_TOKEN_TYPE",
            Self::InvalidKey { .. } => "INVALID_SIGNING_KEY",
        }
    }

    /// True for every failure a client caused by presenting a bad token
    /// (signature, structure, claims, type), excluding expiry.
    pub fn is_invalid_token(&self) -> bool {
        matches!(
            self,
            Self::InvalidToken { .. }
                | Self::JwtDecode { .. }
                | Self::InvalidClaim { .. }
                | Self::WrongTokenType { .. }
        )
    }

    /// Missing or malformed `Authorization` header
    pub fn is_missing_credentials(&self) -> bool {
        matches!(self, Self::MissingHeader { .. } | Self::InvalidScheme { .. })
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
