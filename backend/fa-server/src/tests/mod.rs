mod api;

use crate::AppState;

use fa_auth::{JwtAlgorithm, TokenLifetimes, TokenService};
use fa_config::FrontendConfig;
use fa_db::MemoryIdentityStore;
use fa_linking::RetryConfig;
use fa_providers::ProviderRegistry;

use std::sync::Arc;

pub(crate) const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes!";

pub(crate) fn hs256_tokens(lifetimes: TokenLifetimes) -> TokenService {
    TokenService::new(
        JwtAlgorithm::HS256 {
            secret: TEST_SECRET.as_bytes().to_vec(),
        },
        lifetimes,
    )
    .unwrap()
}

/// State over an empty in-memory store with no OAuth providers
pub(crate) fn create_test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryIdentityStore::new()),
        hs256_tokens(TokenLifetimes::default()),
        ProviderRegistry::new(),
        FrontendConfig::default(),
        RetryConfig::default(),
    )
    .unwrap()
}
