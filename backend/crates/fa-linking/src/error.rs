use fa_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    /// Lost an optimistic-concurrency race. Retried, never surfaced.
    #[error("Concurrent update of identity {email} {location}")]
    StoreConflict {
        email: String,
        location: ErrorLocation,
    },

    #[error("Identity store unavailable: {message} {location}")]
    StoreUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Account already exists for {email} {location}")]
    DuplicateAccount {
        email: String,
        location: ErrorLocation,
    },
}

impl LinkError {
    #[track_caller]
    pub fn duplicate(email: &str) -> Self {
        Self::DuplicateAccount {
            email: email.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::StoreConflict { .. } => "STORE_CONFLICT",
            Self::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            Self::DuplicateAccount { .. } => "DUPLICATE_ACCOUNT",
        }
    }
}

impl From<DbError> for LinkError {
    #[track_caller]
    fn from(error: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            DbError::Conflict { email, .. } => Self::StoreConflict { email, location },
            other => Self::StoreUnavailable {
                message: other.to_string(),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, LinkError>;
