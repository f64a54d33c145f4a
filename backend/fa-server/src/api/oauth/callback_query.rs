use serde::Deserialize;

/// Query string a provider appends when redirecting back
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    /// Set by the provider when the user denied consent
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl CallbackQuery {
    pub fn authorization_code(&self) -> Option<&str> {
        if self.error.is_some() {
            return None;
        }
        self.code.as_deref().filter(|code| !code.trim().is_empty())
    }
}
