use crate::{ConfigError, ConfigErrorResult, DEFAULT_DASHBOARD_URL, DEFAULT_ERROR_URL};

use serde::Deserialize;

/// Where browser redirects land after an OAuth callback
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Receives `#access_token=..&refresh_token=..` on success
    pub dashboard_url: String,
    /// Receives `?message=..` on failure
    pub error_url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dashboard_url: String::from(DEFAULT_DASHBOARD_URL),
            error_url: String::from(DEFAULT_ERROR_URL),
        }
    }
}

impl FrontendConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (field, value) in [
            ("dashboard_url", &self.dashboard_url),
            ("error_url", &self.error_url),
        ] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(ConfigError::config(format!(
                    "frontend.{} must be an http(s) URL, got '{}'",
                    field, value
                )));
            }
        }
        Ok(())
    }
}
