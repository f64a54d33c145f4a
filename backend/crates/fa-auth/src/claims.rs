use crate::{AuthError, Result as AuthErrorResult, TokenType};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// JWT claims shared by access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    pub token_type: TokenType,
}

impl Claims {
    pub fn new(subject: &str, token_type: TokenType, issued_at: i64, ttl_secs: i64) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at + ttl_secs,
            token_type,
        }
    }

    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self, expected: TokenType) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.token_type != expected {
            return Err(AuthError::WrongTokenType {
                expected,
                actual: self.token_type,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
