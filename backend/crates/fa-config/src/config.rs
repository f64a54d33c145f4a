use crate::{
    AuthConfig, CONFIG_DIR_ENV, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, FrontendConfig, LinkingConfig, LoggingConfig, OAuthClientConfig,
    ProvidersConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub providers: ProvidersConfig,
    pub frontend: FrontendConfig,
    pub linking: LinkingConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for FA_CONFIG_DIR env var, else use ./.fedauth/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply FA_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: FA_CONFIG_DIR env var > ./.fedauth/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let config_dir = Self::config_dir()?;

        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&config_dir)?;
        self.providers.validate()?;
        self.frontend.validate()?;
        self.linking.validate()?;

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Resolve a path configured relative to the config directory.
    pub fn resolve_path(&self, relative: &str) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(relative))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  database: {}", self.database.path);
        info!(
            "  auth: {} (access={}s, refresh={}s, leeway={}s)",
            self.auth.algorithm_name(),
            self.auth.access_token_ttl_secs,
            self.auth.refresh_token_ttl_secs,
            self.auth.leeway_secs
        );

        let enabled = self.providers.enabled();
        info!(
            "  providers: [{}] (timeout={}s)",
            if enabled.is_empty() {
                "none".to_string()
            } else {
                enabled.join(", ")
            },
            self.providers.http_timeout_secs
        );

        info!(
            "  frontend: dashboard={}, error={}",
            self.frontend.dashboard_url, self.frontend.error_url
        );

        info!(
            "  linking: attempts={}, initial={}ms, max={}ms, backoff={}x",
            self.linking.max_attempts,
            self.linking.initial_delay_ms,
            self.linking.max_delay_ms,
            self.linking.backoff_multiplier
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("FA_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("FA_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("FA_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_option_string("FA_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_option_string(
            "FA_AUTH_JWT_PRIVATE_KEY_PATH",
            &mut self.auth.jwt_private_key_path,
        );
        Self::apply_env_option_string(
            "FA_AUTH_JWT_PUBLIC_KEY_PATH",
            &mut self.auth.jwt_public_key_path,
        );
        Self::apply_env_parse(
            "FA_AUTH_ACCESS_TOKEN_TTL_SECS",
            &mut self.auth.access_token_ttl_secs,
        );
        Self::apply_env_parse(
            "FA_AUTH_REFRESH_TOKEN_TTL_SECS",
            &mut self.auth.refresh_token_ttl_secs,
        );
        Self::apply_env_parse("FA_AUTH_LEEWAY_SECS", &mut self.auth.leeway_secs);

        // Providers
        Self::apply_env_parse(
            "FA_PROVIDERS_HTTP_TIMEOUT_SECS",
            &mut self.providers.http_timeout_secs,
        );
        Self::apply_client_env("FA_GOOGLE", &mut self.providers.google);
        Self::apply_client_env("FA_GITHUB", &mut self.providers.github);
        Self::apply_client_env("FA_LINKEDIN", &mut self.providers.linkedin);

        // Frontend
        Self::apply_env_string("FA_FRONTEND_DASHBOARD_URL", &mut self.frontend.dashboard_url);
        Self::apply_env_string("FA_FRONTEND_ERROR_URL", &mut self.frontend.error_url);

        // Linking
        Self::apply_env_parse("FA_LINKING_MAX_ATTEMPTS", &mut self.linking.max_attempts);
        Self::apply_env_parse(
            "FA_LINKING_INITIAL_DELAY_MS",
            &mut self.linking.initial_delay_ms,
        );
        Self::apply_env_parse("FA_LINKING_MAX_DELAY_MS", &mut self.linking.max_delay_ms);
        Self::apply_env_parse(
            "FA_LINKING_BACKOFF_MULTIPLIER",
            &mut self.linking.backoff_multiplier,
        );
        Self::apply_env_bool("FA_LINKING_JITTER", &mut self.linking.jitter);

        // Logging
        Self::apply_env_parse("FA_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("FA_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("FA_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply `<PREFIX>_CLIENT_ID`, `_CLIENT_SECRET` and `_REDIRECT_URI`
    fn apply_client_env(prefix: &str, client: &mut OAuthClientConfig) {
        Self::apply_env_option_string(&format!("{prefix}_CLIENT_ID"), &mut client.client_id);
        Self::apply_env_option_string(
            &format!("{prefix}_CLIENT_SECRET"),
            &mut client.client_secret,
        );
        Self::apply_env_option_string(
            &format!("{prefix}_REDIRECT_URI"),
            &mut client.redirect_uri,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
