//! Test utilities for the shiftcare client.
//!
//! This module provides helpers shared by the unit and integration suites:
//! one-time tracing initialization and constructors for synthetic backend
//! failures. It is compiled only for tests, or when the `test-utils` feature
//! is enabled so the `tests/` suites can reach it.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::constants::CODE_INSUFFICIENT_PRIVILEGE;
use crate::core::ClientError;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Initializes the tracing subscriber once regardless of how many times it's
/// called. Respects the `RUST_LOG` environment variable if set, or uses the
/// provided log level; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// A synthetic dropped-connection failure for a given operation.
#[must_use]
pub fn network_failure(operation: &str) -> ClientError {
    ClientError::Network {
        operation: operation.to_string(),
        reason: "connection closed before a response was received".to_string(),
    }
}

/// A synthetic request timeout for a given operation.
#[must_use]
pub fn timeout_failure(operation: &str) -> ClientError {
    ClientError::Timeout {
        operation: operation.to_string(),
        elapsed_ms: 30_000,
    }
}

/// A synthetic row-level-security rejection, as the backend reports one.
#[must_use]
pub fn permission_denied_failure(table: &str) -> ClientError {
    ClientError::Backend {
        code: CODE_INSUFFICIENT_PRIVILEGE.to_string(),
        message: format!("permission denied for table {table}"),
    }
}
