mod retry;

use crate::RetryConfig;

use std::time::Duration;

/// Fast retries with enough headroom for the concurrency tests
pub(crate) fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
        backoff_multiplier: 2.0,
        jitter: true,
    }
}
