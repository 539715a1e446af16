//! Tests for the retry executor's contract: short-circuiting on success,
//! exact attempt budgets, unchanged error propagation, and backoff timing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use shiftcare_client::core::ClientError;
use shiftcare_client::retry::{RetryExecutor, RetryOptions, retry_with_backoff};
use shiftcare_client::test_utils::{network_failure, permission_denied_failure, timeout_failure};

#[tokio::test(start_paused = true)]
async fn success_on_first_attempt_short_circuits() {
    let attempts = AtomicU32::new(0);
    let executor = RetryExecutor::default();

    let started = tokio::time::Instant::now();
    let result: Result<&str, ClientError> = executor
        .run(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Ok("recorded") }
        })
        .await;

    assert_eq!(result, Ok("recorded"));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn success_after_transient_failures_stops_retrying() {
    let attempts = AtomicU32::new(0);
    let executor = RetryExecutor::new(
        RetryOptions::default()
            .max_retries(2)
            .initial_delay(Duration::from_millis(500)),
    );

    let started = tokio::time::Instant::now();
    let result: Result<&str, ClientError> = executor
        .run(|| {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if attempt <= 2 {
                    Err(network_failure("clock_in"))
                } else {
                    Ok("recorded")
                }
            }
        })
        .await;

    // Fails twice, succeeds on the third try: delays of 500ms then 1000ms.
    assert_eq!(result, Ok("recorded"));
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert_eq!(started.elapsed(), Duration::from_millis(1_500));
}

#[tokio::test(start_paused = true)]
async fn exhaustion_makes_max_retries_plus_one_attempts_and_propagates_last_error() {
    let attempts = AtomicU32::new(0);
    let executor = RetryExecutor::new(RetryOptions::default().max_retries(3));

    let result: Result<(), ClientError> = executor
        .run(|| {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                Err(ClientError::Network {
                    operation: "clock_out".to_string(),
                    reason: format!("drop on attempt {attempt}"),
                })
            }
        })
        .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 4);
    // The propagated error is the last one, unchanged.
    assert_eq!(
        result,
        Err(ClientError::Network {
            operation: "clock_out".to_string(),
            reason: "drop on attempt 4".to_string(),
        })
    );
}

#[tokio::test(start_paused = true)]
async fn non_retryable_failure_surfaces_immediately_with_no_delay() {
    let attempts = AtomicU32::new(0);
    let executor = RetryExecutor::new(RetryOptions::default().max_retries(3));

    let started = tokio::time::Instant::now();
    let result: Result<(), ClientError> = executor
        .run(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(permission_denied_failure("clock_events")) }
        })
        .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(result, Err(permission_denied_failure("clock_events")));
}

#[tokio::test(start_paused = true)]
async fn zero_max_retries_disables_retrying_even_for_transient_failures() {
    let attempts = AtomicU32::new(0);
    let executor = RetryExecutor::new(RetryOptions::default().max_retries(0));

    let result: Result<(), ClientError> = executor
        .run(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(timeout_failure("worker_lookup")) }
        })
        .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn backoff_delays_follow_the_capped_exponential_curve() {
    let attempts = AtomicU32::new(0);
    let executor = RetryExecutor::new(
        RetryOptions::default()
            .max_retries(4)
            .initial_delay(Duration::from_millis(1_000))
            .max_delay(Duration::from_millis(3_000)),
    );

    let started = tokio::time::Instant::now();
    let result: Result<(), ClientError> = executor
        .run(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(network_failure("clock_in")) }
        })
        .await;

    assert!(result.is_err());
    assert_eq!(attempts.load(Ordering::SeqCst), 5);
    // Delays: 1000, 2000, then capped at 3000 twice.
    assert_eq!(started.elapsed(), Duration::from_millis(1_000 + 2_000 + 3_000 + 3_000));
}

#[tokio::test(start_paused = true)]
async fn custom_predicate_overrides_default_classification() {
    let attempts = AtomicU32::new(0);
    let executor: RetryExecutor<String> = RetryExecutor::with_predicate(
        RetryOptions::default()
            .max_retries(2)
            .initial_delay(Duration::from_millis(10)),
        |error: &String| error.contains("transient"),
    );

    let result: Result<(), String> = executor
        .run(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err("transient glitch".to_string()) }
        })
        .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert_eq!(result, Err("transient glitch".to_string()));

    // The same predicate refuses anything else on the first failure.
    let attempts = AtomicU32::new(0);
    let executor: RetryExecutor<String> = RetryExecutor::with_predicate(
        RetryOptions::default().max_retries(2),
        |error: &String| error.contains("transient"),
    );
    let result: Result<(), String> = executor
        .run(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err("schema mismatch".to_string()) }
        })
        .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(result, Err("schema mismatch".to_string()));
}

#[tokio::test(start_paused = true)]
async fn default_helper_retries_network_failures_only() {
    let attempts = AtomicU32::new(0);
    let result: Result<&str, ClientError> = retry_with_backoff(|| {
        let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            if attempt == 1 {
                Err(network_failure("clock_in"))
            } else {
                Ok("recorded")
            }
        }
    })
    .await;

    assert_eq!(result, Ok("recorded"));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);

    let attempts = AtomicU32::new(0);
    let result: Result<(), ClientError> = retry_with_backoff(|| {
        attempts.fetch_add(1, Ordering::SeqCst);
        async { Err(ClientError::SessionInvalid) }
    })
    .await;

    assert_eq!(result, Err(ClientError::SessionInvalid));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}
