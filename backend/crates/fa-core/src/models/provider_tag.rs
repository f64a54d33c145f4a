use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Source of an identity assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderTag {
    /// Email + password held by this service
    Local,
    Google,
    Linkedin,
    Github,
}

impl ProviderTag {
    /// Providers reached through an authorization-code redirect
    pub const EXTERNAL: [ProviderTag; 3] = [Self::Google, Self::Linkedin, Self::Github];

    /// Convert to database / wire string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Google => "google",
            Self::Linkedin => "linkedin",
            Self::Github => "github",
        }
    }

    /// Human-facing provider name used in user messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Google => "Google",
            Self::Linkedin => "LinkedIn",
            Self::Github => "GitHub",
        }
    }

    pub fn is_external(&self) -> bool {
        !matches!(self, Self::Local)
    }
}

impl FromStr for ProviderTag {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "local" => Ok(Self::Local),
            "google" => Ok(Self::Google),
            "linkedin" => Ok(Self::Linkedin),
            "github" => Ok(Self::Github),
            _ => Err(CoreError::InvalidProviderTag {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
