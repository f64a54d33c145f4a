use serde::Serialize;

/// Freshly minted credentials for one subject
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
