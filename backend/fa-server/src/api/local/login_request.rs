use crate::api::local::register_request::non_blank;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn into_required(self) -> Option<(String, String)> {
        Some((non_blank(self.email)?, non_blank(self.password)?))
    }
}
