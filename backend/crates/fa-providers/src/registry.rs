use crate::{
    GithubProvider, GoogleProvider, LinkedinProvider, OAuthProvider, ProviderAdapter,
    Result as ProviderResult, build_http_client,
};

use fa_config::ProvidersConfig;
use fa_core::ProviderTag;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::info;

/// External providers available for login, built once at startup
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderTag, Arc<dyn OAuthProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an adapter for every provider with a configured client id.
    /// All adapters share one HTTP client bounded by `http_timeout_secs`.
    pub fn from_config(config: &ProvidersConfig) -> ProviderResult<Self> {
        let http = build_http_client(Duration::from_secs(config.http_timeout_secs))?;
        let mut registry = Self::new();

        if config.google.is_enabled() {
            registry.register(Arc::new(GoogleProvider::new(&config.google, http.clone())?));
        }
        if config.github.is_enabled() {
            registry.register(Arc::new(GithubProvider::new(&config.github, http.clone())?));
        }
        if config.linkedin.is_enabled() {
            registry.register(Arc::new(LinkedinProvider::new(&config.linkedin, http)?));
        }

        info!("Enabled OAuth providers: {:?}", registry.tags());
        Ok(registry)
    }

    pub fn register(&mut self, provider: Arc<dyn OAuthProvider>) {
        self.providers.insert(provider.tag(), provider);
    }

    pub fn get(&self, tag: ProviderTag) -> Option<Arc<dyn OAuthProvider>> {
        self.providers.get(&tag).cloned()
    }

    pub fn tags(&self) -> Vec<ProviderTag> {
        let mut tags: Vec<_> = self.providers.keys().copied().collect();
        tags.sort();
        tags
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
