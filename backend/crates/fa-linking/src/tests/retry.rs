use super::fast_retry;
use crate::{Backoff, ConflictError, LinkError, RetryConfig, retry_on_conflict};

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use error_location::ErrorLocation;
use googletest::prelude::*;

#[derive(Debug, PartialEq)]
enum TestError {
    Conflict,
    Fatal,
    GaveUp(u32),
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ConflictError for TestError {
    fn is_conflict(&self) -> bool {
        *self == Self::Conflict
    }

    fn exhausted(self, attempts: u32) -> Self {
        Self::GaveUp(attempts)
    }
}

#[tokio::test]
async fn given_transient_conflicts_when_retried_then_eventually_succeeds() {
    let calls = AtomicU32::new(0);

    let result = retry_on_conflict(&fast_retry(5), "test", || async {
        if calls.fetch_add(1, Ordering::SeqCst) < 2 {
            Err(TestError::Conflict)
        } else {
            Ok("done")
        }
    })
    .await;

    assert_that!(result.unwrap(), eq("done"));
    assert_that!(calls.load(Ordering::SeqCst), eq(3));
}

#[tokio::test]
async fn given_non_conflict_failure_then_not_retried() {
    let calls = AtomicU32::new(0);

    let result: Result<(), TestError> = retry_on_conflict(&fast_retry(5), "test", || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(TestError::Fatal)
    })
    .await;

    assert_eq!(result.unwrap_err(), TestError::Fatal);
    assert_that!(calls.load(Ordering::SeqCst), eq(1));
}

#[tokio::test]
async fn given_endless_conflicts_then_stops_at_max_attempts_and_reports_exhaustion() {
    let calls = AtomicU32::new(0);

    let result: Result<(), TestError> = retry_on_conflict(&fast_retry(4), "test", || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(TestError::Conflict)
    })
    .await;

    assert_eq!(result.unwrap_err(), TestError::GaveUp(4));
    assert_that!(calls.load(Ordering::SeqCst), eq(4));
}

#[tokio::test]
async fn given_zero_max_attempts_then_operation_still_runs_once() {
    let calls = AtomicU32::new(0);

    let result: Result<(), TestError> = retry_on_conflict(&fast_retry(0), "test", || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(TestError::Conflict)
    })
    .await;

    assert_eq!(result.unwrap_err(), TestError::GaveUp(1));
    assert_that!(calls.load(Ordering::SeqCst), eq(1));
}

#[test]
fn given_link_conflict_when_exhausted_then_store_unavailable() {
    let conflict = LinkError::StoreConflict {
        email: "a@x.com".to_string(),
        location: ErrorLocation::from(std::panic::Location::caller()),
    };

    let error = conflict.exhausted(3);

    assert!(matches!(error, LinkError::StoreUnavailable { .. }));
    assert!(!error.is_conflict());
}

#[test]
fn given_no_jitter_then_delays_double_up_to_max() {
    let config = RetryConfig {
        max_attempts: 10,
        initial_delay: Duration::from_millis(100),
        max_delay: Duration::from_millis(350),
        backoff_multiplier: 2.0,
        jitter: false,
    };
    let mut backoff = Backoff::new(&config);

    let delays: Vec<_> = (0..4).map(|_| backoff.next_delay()).collect();

    assert_eq!(
        delays,
        vec![
            Duration::from_millis(100),
            Duration::from_millis(200),
            Duration::from_millis(350),
            Duration::from_millis(350),
        ]
    );
}

#[test]
fn given_jitter_then_delay_stays_within_half_to_one_and_a_half() {
    let config = RetryConfig {
        jitter: true,
        initial_delay: Duration::from_millis(100),
        max_delay: Duration::from_millis(100),
        ..fast_retry(3)
    };
    let mut backoff = Backoff::new(&config);

    for _ in 0..20 {
        let delay = backoff.next_delay();
        assert!(delay >= Duration::from_millis(50) && delay <= Duration::from_millis(150));
    }
}
