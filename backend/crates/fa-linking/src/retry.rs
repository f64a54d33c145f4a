//! Bounded re-runs of an operation that lost an optimistic-concurrency race.

use crate::LinkError;

use fa_config::LinkingConfig;

use std::fmt::Display;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::sleep;

/// Attempt budget and backoff between conflicting link attempts
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts including the first; never less than one
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Scale each delay by a random 0.5-1.5 factor
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from(&LinkingConfig::default())
    }
}

impl From<&LinkingConfig> for RetryConfig {
    fn from(config: &LinkingConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            backoff_multiplier: config.backoff_multiplier,
            jitter: config.jitter,
        }
    }
}

/// Errors that can report a lost compare-and-update
pub trait ConflictError: Display + Sized {
    fn is_conflict(&self) -> bool;

    /// What the caller sees once every attempt ended in a conflict
    fn exhausted(self, attempts: u32) -> Self;
}

impl ConflictError for LinkError {
    fn is_conflict(&self) -> bool {
        matches!(self, Self::StoreConflict { .. })
    }

    fn exhausted(self, attempts: u32) -> Self {
        match self {
            Self::StoreConflict { email, .. } => LinkError::unavailable(format!(
                "identity {} kept changing concurrently ({} attempts)",
                email, attempts
            )),
            other => other,
        }
    }
}

/// Delay sequence: grows by `backoff_multiplier`, capped at `max_delay`
#[derive(Debug)]
pub struct Backoff<'a> {
    config: &'a RetryConfig,
    current: Duration,
}

impl<'a> Backoff<'a> {
    pub fn new(config: &'a RetryConfig) -> Self {
        Self {
            config,
            current: config.initial_delay.min(config.max_delay),
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        let base = self.current;
        self.current = base
            .mul_f64(self.config.backoff_multiplier.max(1.0))
            .min(self.config.max_delay);

        if self.config.jitter {
            base.mul_f64(rand::random_range(0.5..1.5))
        } else {
            base
        }
    }
}

/// Run `operation` until it succeeds, fails with something other than a
/// conflict, or the attempt budget is spent. A spent budget is reported
/// through [`ConflictError::exhausted`], never as the raw conflict.
pub async fn retry_on_conflict<F, Fut, T, E>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: ConflictError,
{
    let max_attempts = config.max_attempts.max(1);
    let mut backoff = Backoff::new(config);
    let mut attempt = 0;

    loop {
        attempt += 1;

        let error = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!("{} settled on attempt {}", operation_name, attempt);
                }
                return Ok(value);
            }
            Err(e) if !e.is_conflict() => return Err(e),
            Err(e) => e,
        };

        if attempt >= max_attempts {
            warn!("{} still conflicting after {} attempts: {}", operation_name, attempt, error);
            return Err(error.exhausted(attempt));
        }

        let delay = backoff.next_delay();
        debug!("{} conflicted ({}), re-reading in {:?}", operation_name, error, delay);
        sleep(delay).await;
    }
}
