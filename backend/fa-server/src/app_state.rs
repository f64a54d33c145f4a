use crate::error::{Result as ServerErrorResult, ServerError};

use fa_auth::{JwtAlgorithm, TokenLifetimes, TokenService};
use fa_config::{AuthConfig, Config, FrontendConfig};
use fa_db::IdentityStore;
use fa_linking::{AccountLinker, RetryConfig};
use fa_providers::{LocalAdapter, ProviderRegistry};

use std::sync::Arc;

use log::info;

/// Process-wide handles shared by every request.
/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn IdentityStore>,
    pub tokens: Arc<TokenService>,
    pub linker: Arc<AccountLinker>,
    pub local: Arc<LocalAdapter>,
    pub providers: Arc<ProviderRegistry>,
    pub frontend: Arc<FrontendConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        tokens: TokenService,
        providers: ProviderRegistry,
        frontend: FrontendConfig,
        retry: RetryConfig,
    ) -> ServerErrorResult<Self> {
        let local = LocalAdapter::new(store.clone())?;
        let linker = AccountLinker::new(store.clone(), retry);

        Ok(Self {
            store,
            tokens: Arc::new(tokens),
            linker: Arc::new(linker),
            local: Arc::new(local),
            providers: Arc::new(providers),
            frontend: Arc::new(frontend),
        })
    }

    /// Wire every component from validated configuration
    pub fn from_config(config: &Config, store: Arc<dyn IdentityStore>) -> ServerErrorResult<Self> {
        let tokens = TokenService::new(jwt_algorithm(config)?, token_lifetimes(&config.auth))?;
        info!("Token service ready ({})", tokens.algorithm());

        let providers = ProviderRegistry::from_config(&config.providers)?;

        Self::new(
            store,
            tokens,
            providers,
            config.frontend.clone(),
            RetryConfig::from(&config.linking),
        )
    }
}

/// HS256 when a shared secret is configured, otherwise RS256 from key files
pub fn jwt_algorithm(config: &Config) -> ServerErrorResult<JwtAlgorithm> {
    if let Some(ref secret) = config.auth.jwt_secret {
        return Ok(JwtAlgorithm::HS256 {
            secret: secret.as_bytes().to_vec(),
        });
    }

    let (Some(private_path), Some(public_path)) = (
        config.auth.jwt_private_key_path.as_deref(),
        config.auth.jwt_public_key_path.as_deref(),
    ) else {
        return Err(fa_config::ConfigError::auth(
            "Either jwt_secret or both JWT key paths must be configured",
        )
        .into());
    };

    Ok(JwtAlgorithm::RS256 {
        private_key_pem: read_key_file(config, private_path)?,
        public_key_pem: read_key_file(config, public_path)?,
    })
}

fn read_key_file(config: &Config, relative: &str) -> ServerErrorResult<String> {
    let path = config.resolve_path(relative)?;
    std::fs::read_to_string(&path).map_err(|source| ServerError::JwtKeyFile {
        path: path.display().to_string(),
        source,
    })
}

fn token_lifetimes(auth: &AuthConfig) -> TokenLifetimes {
    TokenLifetimes {
        access_ttl_secs: auth.access_token_ttl_secs as i64,
        refresh_ttl_secs: auth.refresh_token_ttl_secs as i64,
        leeway_secs: auth.leeway_secs,
    }
}
