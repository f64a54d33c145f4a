use crate::{ProviderError, Result as ProviderResult};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;

const USER_AGENT: &str = concat!("fedauth/", env!("CARGO_PKG_VERSION"));

/// Shared client for all outbound provider calls. Every request is bounded by
/// `timeout`, after which it fails instead of hanging the caller.
#[track_caller]
pub fn build_http_client(timeout: Duration) -> ProviderResult<reqwest::Client> {
    let location = ErrorLocation::from(Location::caller());
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ProviderError::HttpClient {
            message: e.to_string(),
            location,
        })
}
