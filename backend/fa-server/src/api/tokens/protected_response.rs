use fa_core::ProviderTag;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProtectedResponse {
    pub message: String,
    pub email: String,
    /// Linked external providers; `local` is never listed
    pub oauth_providers: Vec<ProviderTag>,
}
