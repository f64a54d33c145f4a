use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    /// Another writer got there first: the row already exists, or its
    /// version moved since it was read.
    #[error("Concurrent modification of identity {email} {location}")]
    Conflict {
        email: String,
        location: ErrorLocation,
    },

    #[error("Corrupt identity row {email}: {message} {location}")]
    Corrupt {
        email: String,
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    #[track_caller]
    pub fn conflict(email: &str) -> Self {
        Self::Conflict {
            email: email.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn corrupt(email: &str, message: impl Into<String>) -> Self {
        Self::Corrupt {
            email: email.to_string(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
