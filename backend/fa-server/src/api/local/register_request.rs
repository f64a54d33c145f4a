use serde::Deserialize;

/// Body of `POST /register`; every field is required and non-blank
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl RegisterRequest {
    /// `(email, password, name)` when all three are present
    pub fn into_required(self) -> Option<(String, String, String)> {
        Some((
            non_blank(self.email)?,
            non_blank(self.password)?,
            non_blank(self.name)?,
        ))
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
