use serde::Deserialize;

/// Optional body of `POST /refresh` for clients that cannot set headers
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
}

impl RefreshRequest {
    /// Token from a JSON body; empty or unparsable bodies yield `None`
    pub fn token_from_body(body: &[u8]) -> Option<String> {
        if body.is_empty() {
            return None;
        }
        serde_json::from_slice::<RefreshRequest>(body)
            .ok()?
            .refresh_token
            .filter(|token| !token.trim().is_empty())
    }
}
