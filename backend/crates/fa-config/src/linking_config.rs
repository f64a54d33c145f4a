use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Retry constraints
pub const MIN_MAX_ATTEMPTS: u32 = 1;
pub const MAX_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

pub const MIN_INITIAL_DELAY_MS: u64 = 1;
pub const MAX_INITIAL_DELAY_MS: u64 = 1000;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 10;

pub const MAX_MAX_DELAY_MS: u64 = 5000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 500;

pub const MIN_BACKOFF_MULTIPLIER: f64 = 1.0;
pub const MAX_BACKOFF_MULTIPLIER: f64 = 10.0;
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

pub const DEFAULT_JITTER: bool = true;

/// Retry budget for account merges that lose an optimistic-concurrency race.
///
/// Uses exponential backoff with optional jitter so that two requests
/// racing on the same email do not keep colliding.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinkingConfig {
    /// Maximum number of merge attempts (including the first)
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds
    pub initial_delay_ms: u64,
    /// Upper bound on the delay between retries in milliseconds
    pub max_delay_ms: u64,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Randomize delays
    pub jitter: bool,
}

impl Default for LinkingConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            jitter: DEFAULT_JITTER,
        }
    }
}

impl LinkingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_attempts < MIN_MAX_ATTEMPTS || self.max_attempts > MAX_MAX_ATTEMPTS {
            return Err(ConfigError::config(format!(
                "linking.max_attempts must be {}-{}, got {}",
                MIN_MAX_ATTEMPTS, MAX_MAX_ATTEMPTS, self.max_attempts
            )));
        }

        if self.initial_delay_ms < MIN_INITIAL_DELAY_MS
            || self.initial_delay_ms > MAX_INITIAL_DELAY_MS
        {
            return Err(ConfigError::config(format!(
                "linking.initial_delay_ms must be {}-{}, got {}",
                MIN_INITIAL_DELAY_MS, MAX_INITIAL_DELAY_MS, self.initial_delay_ms
            )));
        }

        if self.max_delay_ms < self.initial_delay_ms || self.max_delay_ms > MAX_MAX_DELAY_MS {
            return Err(ConfigError::config(format!(
                "linking.max_delay_ms must be {}-{}, got {}",
                self.initial_delay_ms, MAX_MAX_DELAY_MS, self.max_delay_ms
            )));
        }

        if self.backoff_multiplier < MIN_BACKOFF_MULTIPLIER
            || self.backoff_multiplier > MAX_BACKOFF_MULTIPLIER
        {
            return Err(ConfigError::config(format!(
                "linking.backoff_multiplier must be {}-{}, got {}",
                MIN_BACKOFF_MULTIPLIER, MAX_BACKOFF_MULTIPLIER, self.backoff_multiplier
            )));
        }

        Ok(())
    }
}
