use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}
