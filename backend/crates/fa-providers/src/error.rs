use fa_core::ProviderTag;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} token exchange failed: {message} {location}")]
    TokenExchangeFailed {
        provider: ProviderTag,
        message: String,
        location: ErrorLocation,
    },

    #[error("{provider} profile request failed: {message} {location}")]
    ProfileFetchFailed {
        provider: ProviderTag,
        message: String,
        location: ErrorLocation,
    },

    #[error("{provider} returned no usable email {location}")]
    EmailMissing {
        provider: ProviderTag,
        location: ErrorLocation,
    },

    #[error("{provider} unreachable: {message} {location}")]
    Unreachable {
        provider: ProviderTag,
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity token rejected: {message} {location}")]
    IdentityTokenInvalid {
        message: String,
        location: ErrorLocation,
    },

    #[error("Account already exists for {email} {location}")]
    DuplicateAccount {
        email: String,
        location: ErrorLocation,
    },

    #[error("Invalid email or password {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Identity store unavailable: {message} {location}")]
    StoreUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    Hashing {
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP client setup failed: {message} {location}")]
    HttpClient {
        message: String,
        location: ErrorLocation,
    },

    #[error("Provider {provider} is not configured {location}")]
    NotConfigured {
        provider: ProviderTag,
        location: ErrorLocation,
    },
}

impl ProviderError {
    #[track_caller]
    pub fn token_exchange(provider: ProviderTag, message: impl Into<String>) -> Self {
        Self::TokenExchangeFailed {
            provider,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn profile_fetch(provider: ProviderTag, message: impl Into<String>) -> Self {
        Self::ProfileFetchFailed {
            provider,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unreachable(provider: ProviderTag, message: impl Into<String>) -> Self {
        Self::Unreachable {
            provider,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn email_missing(provider: ProviderTag) -> Self {
        Self::EmailMissing {
            provider,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn identity_token(message: impl Into<String>) -> Self {
        Self::IdentityTokenInvalid {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Classify a transport failure. Timeouts and connection failures mean the
    /// provider is unreachable; anything else is charged to `stage`.
    #[track_caller]
    pub fn from_transport(provider: ProviderTag, stage: Stage, error: reqwest::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());
        if error.is_timeout() || error.is_connect() {
            return Self::Unreachable {
                provider,
                message: error.to_string(),
                location,
            };
        }

        let message = error.to_string();
        match stage {
            Stage::TokenExchange => Self::TokenExchangeFailed {
                provider,
                message,
                location,
            },
            Stage::Profile => Self::ProfileFetchFailed {
                provider,
                message,
                location,
            },
            Stage::SigningKeys => Self::ProfileFetchFailed {
                provider,
                message: format!("signing keys unavailable: {}", message),
                location,
            },
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TokenExchangeFailed { .. } => "PROVIDER_TOKEN_EXCHANGE_FAILED",
            Self::ProfileFetchFailed { .. } => "PROVIDER_PROFILE_FAILED",
            Self::EmailMissing { .. } => "PROVIDER_EMAIL_MISSING",
            Self::Unreachable { .. } => "PROVIDER_UNREACHABLE",
            Self::IdentityTokenInvalid { .. } => "IDENTITY_TOKEN_INVALID",
            Self::DuplicateAccount { .. } => "DUPLICATE_ACCOUNT",
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            Self::Hashing { .. } => "PASSWORD_HASHING_FAILED",
            Self::HttpClient { .. } => "HTTP_CLIENT_FAILED",
            Self::NotConfigured { .. } => "PROVIDER_NOT_CONFIGURED",
        }
    }

    /// Short reason safe to show an end user (no source locations, no internals)
    pub fn user_message(&self) -> String {
        match self {
            Self::TokenExchangeFailed { .. } => "could not obtain an access token".to_string(),
            Self::ProfileFetchFailed { .. } => "could not fetch the user profile".to_string(),
            Self::EmailMissing { .. } => "no email returned".to_string(),
            Self::Unreachable { .. } => "provider did not respond".to_string(),
            Self::IdentityTokenInvalid { .. } => "identity token could not be verified".to_string(),
            Self::DuplicateAccount { .. } => "account already exists".to_string(),
            Self::InvalidCredentials { .. } => "invalid email or password".to_string(),
            Self::StoreUnavailable { .. } | Self::Hashing { .. } | Self::HttpClient { .. } => {
                "internal error".to_string()
            }
            Self::NotConfigured { provider, .. } => {
                format!("{} login is not enabled", provider.display_name())
            }
        }
    }
}

impl From<fa_db::DbError> for ProviderError {
    #[track_caller]
    fn from(error: fa_db::DbError) -> Self {
        Self::StoreUnavailable {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Step of an authorization-code flow a transport failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    TokenExchange,
    Profile,
    SigningKeys,
}

pub type Result<T> = std::result::Result<T, ProviderError>;
