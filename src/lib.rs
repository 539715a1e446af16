//! shiftcare-client - Resilient data-access core for a mobile workforce client
//!
//! The data-access layer of a workforce-management client for care workers
//! (clock-in/out, scheduling, timesheets), backed by a hosted relational
//! database and authentication service. The hosted backend owns the hard
//! parts (row-level security, session persistence, query filtering), so
//! this crate concentrates on the piece the client must get right on its
//! own: surviving the flaky connectivity of a phone in the field without
//! ever retrying a failure the backend will deterministically reproduce.
//!
//! # Architecture Overview
//!
//! Every screen that writes to the backend (clock in, clock out, worker
//! lookup) funnels the operation through the retry executor:
//!
//! 1. The raw failure, an optional HTTP status plus a loosely shaped JSON
//!    body, is mapped into the typed [`core::ClientError`] union.
//! 2. [`core::classify()`] buckets the error: network failures are transient
//!    and retryable; structured backend rejections are deterministic and
//!    surfaced immediately; unrecognized shapes fail closed.
//! 3. [`retry::RetryExecutor`] re-invokes the operation with capped
//!    exponential backoff, then propagates the final error unchanged so the
//!    caller's messaging logic sees the original `code`/`message`.
//!
//! ## Key Properties
//!
//! - **No error wrapping**: exhaustion re-raises the last underlying error,
//!   not a distinct "gave up" type
//! - **Fail closed**: only network-classified failures are retried by default
//! - **No shared state**: concurrent retry sequences are fully independent
//! - **Injected configuration**: one [`config::ClientConfig`] is built at
//!   startup and passed in; nothing reads a process-wide global
//!
//! # Core Modules
//!
//! - [`core`] - Error types, user-facing error contexts, and failure
//!   classification
//! - [`retry`] - The retry executor and backoff computation
//! - [`config`] - Process-wide client configuration (`config.toml`)
//! - [`constants`] - Retry defaults and recognized backend error codes
//!
//! # Example
//!
//! ```rust,no_run
//! use shiftcare_client::config::ClientConfig;
//! use shiftcare_client::core::ClientError;
//! use shiftcare_client::retry::RetryExecutor;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::load().await?;
//! config.validate()?;
//!
//! let executor = RetryExecutor::new(config.retry.into());
//! let result: Result<(), ClientError> = executor
//!     .run(|| async {
//!         // perform the clock-in write against the backend
//!         Ok(())
//!     })
//!     .await;
//! # Ok(())
//! # }
//! ```

// Core functionality modules
pub mod config;
pub mod constants;
pub mod core;
pub mod retry;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
