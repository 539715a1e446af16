//! Retry with exponential backoff for backend write operations.
//!
//! Screens that perform writes against the remote data store (clock in,
//! clock out, worker lookup) funnel those operations through this module.
//! The executor wraps an arbitrary asynchronous operation, classifies its
//! failures, and re-invokes it with exponentially increasing delays up to a
//! bounded attempt count.
//!
//! # Retry Policy
//!
//! - Only failures the `should_retry` predicate accepts are retried. The
//!   default predicate is [`ClientError::is_transient`], which retries
//!   network-classified failures only; deterministic backend rejections
//!   (row-level-security denials, malformed queries) surface immediately.
//! - The delay before retry `i + 1` is `min(initial_delay * 2^i, max_delay)`.
//! - After `max_retries` retries the last failure is re-raised unchanged.
//!   There is no distinct "gave up" error: callers inspect the propagated
//!   error's `code`/`message` exactly as they would after a single attempt.
//!
//! # Concurrency
//!
//! The loop suspends the calling task with [`tokio::time::sleep`] between
//! attempts. It spawns nothing and shares nothing: concurrent invocations
//! are fully independent. There is no cancellation token and no timeout on
//! the wrapped operation itself; only the inter-attempt delay is bounded.
//!
//! # Examples
//!
//! ```rust,no_run
//! use shiftcare_client::retry::{RetryExecutor, RetryOptions};
//! use shiftcare_client::core::ClientError;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), ClientError> {
//! let executor = RetryExecutor::new(
//!     RetryOptions::default()
//!         .max_retries(2)
//!         .initial_delay(Duration::from_millis(500)),
//! );
//!
//! let row_id = executor
//!     .run(|| async { submit_clock_in().await })
//!     .await?;
//! # Ok(())
//! # }
//! # async fn submit_clock_in() -> Result<u64, ClientError> { Ok(1) }
//! ```

pub mod backoff;

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::constants::{DEFAULT_INITIAL_DELAY_MS, DEFAULT_MAX_DELAY_MS, DEFAULT_MAX_RETRIES};
use crate::core::{ClientError, ClientResult};

pub use backoff::delay_for_attempt;

/// Configuration for a retry sequence.
///
/// The defaults follow the client-wide policy: 3 retries after the initial
/// try, delays starting at 1s and capped at 10s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryOptions {
    /// Maximum number of retry attempts after the initial try.
    pub max_retries: u32,
    /// Base delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on any computed delay.
    pub max_delay: Duration,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetryOptions {
    /// Set the maximum number of retry attempts after the initial try.
    ///
    /// Zero disables retries entirely: the operation runs once and any
    /// failure is surfaced immediately.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay before the first retry.
    #[must_use]
    pub const fn initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Set the upper bound on any computed delay.
    #[must_use]
    pub const fn max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }
}

/// Retry eligibility predicate over a captured failure.
type RetryPredicate<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// Executes asynchronous operations with bounded, classified retries.
///
/// Generic over the operation's error type so tests and non-standard
/// callers can supply their own predicate; the common case uses
/// [`ClientError`] with the default transient-failure classification.
pub struct RetryExecutor<E = ClientError> {
    options: RetryOptions,
    should_retry: RetryPredicate<E>,
}

impl RetryExecutor<ClientError> {
    /// Create an executor with the default predicate,
    /// [`ClientError::is_transient`].
    #[must_use]
    pub fn new(options: RetryOptions) -> Self {
        Self {
            options,
            should_retry: Box::new(ClientError::is_transient),
        }
    }
}

impl Default for RetryExecutor<ClientError> {
    fn default() -> Self {
        Self::new(RetryOptions::default())
    }
}

impl<E> RetryExecutor<E> {
    /// Create an executor with a custom retry predicate.
    ///
    /// The predicate is evaluated once per failure; returning `false`
    /// surfaces that failure immediately with no further delay.
    pub fn with_predicate<P>(options: RetryOptions, should_retry: P) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Self {
            options,
            should_retry: Box::new(should_retry),
        }
    }

    /// The options this executor was configured with.
    #[must_use]
    pub const fn options(&self) -> &RetryOptions {
        &self.options
    }

    /// Run an operation, retrying eligible failures with capped exponential
    /// backoff.
    ///
    /// The operation is a zero-argument closure producing a future; it is
    /// re-invoked from scratch on each attempt. On success the result is
    /// returned immediately. On failure the original error is re-raised
    /// unchanged once it is classified non-retryable or the retry budget is
    /// exhausted, with no wrapping and no information loss.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        // Counts failed attempts so far; also indexes the backoff curve.
        let mut attempt: u32 = 0;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !(self.should_retry)(&error) {
                        debug!(
                            target: "client::retry",
                            attempt = attempt + 1,
                            "failure is not retryable: {error}"
                        );
                        return Err(error);
                    }

                    if attempt >= self.options.max_retries {
                        warn!(
                            target: "client::retry",
                            attempts = attempt + 1,
                            "retry budget exhausted: {error}"
                        );
                        return Err(error);
                    }

                    let delay = backoff::delay_for_attempt(
                        attempt,
                        self.options.initial_delay,
                        self.options.max_delay,
                    );
                    debug!(
                        target: "client::retry",
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "retrying after transient failure: {error}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Run an operation with the client-wide default retry policy.
///
/// Shorthand for [`RetryExecutor::default`] followed by
/// [`run`](RetryExecutor::run); retries transient network failures only.
pub async fn retry_with_backoff<T, F, Fut>(operation: F) -> ClientResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    RetryExecutor::default().run(operation).await
}
