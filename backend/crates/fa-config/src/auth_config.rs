use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_LEEWAY_SECS,
    DEFAULT_REFRESH_TOKEN_TTL_SECS, MAX_LEEWAY_SECS, MAX_REFRESH_TOKEN_TTL_SECS,
    MIN_JWT_SECRET_LENGTH,
};

use std::path::Path;

use serde::Deserialize;

/// Token signing and lifetime settings.
///
/// Exactly one signing mode is used: `jwt_secret` (HS256) wins over the
/// RS256 key pair when both are present.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    /// PEM private key, relative to the config directory
    pub jwt_private_key_path: Option<String>,
    /// PEM public key, relative to the config directory
    pub jwt_public_key_path: Option<String>,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    /// Clock skew tolerance applied to `exp`/`nbf`
    pub leeway_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_private_key_path: None,
            jwt_public_key_path: None,
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            refresh_token_ttl_secs: DEFAULT_REFRESH_TOKEN_TTL_SECS,
            leeway_secs: DEFAULT_LEEWAY_SECS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        match (
            &self.jwt_secret,
            &self.jwt_private_key_path,
            &self.jwt_public_key_path,
        ) {
            (Some(secret), _, _) => {
                if secret.len() < MIN_JWT_SECRET_LENGTH {
                    return Err(ConfigError::auth(format!(
                        "auth.jwt_secret must be at least {} characters",
                        MIN_JWT_SECRET_LENGTH
                    )));
                }
            }
            (None, Some(private_key), Some(public_key)) => {
                Self::validate_key_path(config_dir, "jwt_private_key_path", private_key)?;
                Self::validate_key_path(config_dir, "jwt_public_key_path", public_key)?;
            }
            _ => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret or both auth.jwt_private_key_path and auth.jwt_public_key_path must be set",
                ));
            }
        }

        if self.access_token_ttl_secs == 0 {
            return Err(ConfigError::auth("auth.access_token_ttl_secs must be > 0"));
        }

        if self.refresh_token_ttl_secs <= self.access_token_ttl_secs
            || self.refresh_token_ttl_secs > MAX_REFRESH_TOKEN_TTL_SECS
        {
            return Err(ConfigError::auth(format!(
                "auth.refresh_token_ttl_secs must be longer than the access token lifetime and <= {}, got {}",
                MAX_REFRESH_TOKEN_TTL_SECS, self.refresh_token_ttl_secs
            )));
        }

        if self.leeway_secs > MAX_LEEWAY_SECS {
            return Err(ConfigError::auth(format!(
                "auth.leeway_secs must be <= {}, got {}",
                MAX_LEEWAY_SECS, self.leeway_secs
            )));
        }

        Ok(())
    }

    /// Signing mode name for logging
    pub fn algorithm_name(&self) -> &'static str {
        if self.jwt_secret.is_some() {
            "HS256"
        } else if self.jwt_private_key_path.is_some() {
            "RS256"
        } else {
            "none"
        }
    }

    fn validate_key_path(config_dir: &Path, field: &str, key_path: &str) -> ConfigErrorResult<()> {
        let path = Path::new(key_path);
        if path.is_absolute() {
            return Err(ConfigError::auth(format!(
                "auth.{} must be relative to the config directory",
                field
            )));
        }
        if key_path.contains("..") {
            return Err(ConfigError::auth(format!(
                "auth.{} cannot contain '..'",
                field
            )));
        }
        let full_path = config_dir.join(path);
        if !full_path.exists() {
            return Err(ConfigError::auth(format!(
                "auth.{} file does not exist: {}",
                field,
                full_path.display()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("jwt_private_key_path", &self.jwt_private_key_path)
            .field("jwt_public_key_path", &self.jwt_public_key_path)
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("refresh_token_ttl_secs", &self.refresh_token_ttl_secs)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}
