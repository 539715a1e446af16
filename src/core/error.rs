//! Error handling for the shiftcare client core.
//!
//! This module provides the error types shared by every component that talks
//! to the hosted backend. The error system is designed around two principles:
//! 1. **Strongly-typed errors** for precise handling in code, in particular
//!    the retry layer, which must distinguish transient failures from
//!    deterministic ones
//! 2. **User-friendly messages** with actionable suggestions for the screens
//!    that surface failures to care workers
//!
//! # Architecture
//!
//! The error system consists of two main types:
//! - [`ClientError`] - Enumerated error types for all failure cases in the client
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! Client errors fall into three classification groups (see
//! [`classify`](super::classify)):
//! - **Network**: [`ClientError::Network`], [`ClientError::Timeout`], and
//!   transient I/O failures. No response ever arrived, so the request may be
//!   retried safely
//! - **Backend**: [`ClientError::Backend`], [`ClientError::SessionInvalid`]:
//!   the backend answered with a structured rejection; retrying reproduces
//!   the identical failure
//! - **Unknown**: everything else, treated conservatively as non-retryable
//!
//! # Propagation Policy
//!
//! Errors are never swallowed or wrapped by the retry layer: a failed
//! operation re-raises the original [`ClientError`] unchanged so that callers
//! can inspect `code`/`message` for user-facing text. Conversion to
//! [`ErrorContext`] happens only at the display boundary, via
//! [`user_friendly_error`].
//!
//! # Examples
//!
//! ```rust
//! use shiftcare_client::core::{ClientError, user_friendly_error};
//!
//! fn clock_in() -> Result<(), ClientError> {
//!     Err(ClientError::Backend {
//!         code: "42501".to_string(),
//!         message: "permission denied for table clock_events".to_string(),
//!     })
//! }
//!
//! if let Err(e) = clock_in() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display(); // Shows colored error with suggestions
//! }
//! ```

use colored::Colorize;
use std::fmt;
use std::io;
use thiserror::Error;

use crate::constants::{CODE_INSUFFICIENT_PRIVILEGE, CODE_JWT_EXPIRED, CODE_ROW_NOT_FOUND};

/// Convenient result type for client operations using [`ClientError`].
pub type ClientResult<T> = Result<T, ClientError>;

/// The main error type for client data-access operations.
///
/// Each variant represents a specific failure mode with enough context for
/// both the retry layer (classification) and the UI layer (messaging).
/// Variants are deliberately `Clone` + `Eq` so tests and callers can hold
/// onto a failure across retry attempts and compare the propagated error
/// against the one originally injected.
///
/// # Design Philosophy
///
/// - **Specific error types**: each variant represents one failure mode
/// - **Rich context**: errors carry the operation name and backend details
/// - **Classification first**: the variant alone determines retry eligibility;
///   no string matching is needed at the call site
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// No response was received from the backend.
    ///
    /// Covers dropped connectivity, DNS failures, and aborted requests.
    /// These failures are transient: the request never reached the backend
    /// (or its answer never reached us), so it is safe to retry.
    ///
    /// # Fields
    /// - `operation`: the data-access operation that failed (e.g. "clock_in")
    /// - `reason`: transport-level description of the failure
    #[error("Network error during {operation}: {reason}")]
    Network {
        /// The data-access operation that failed (e.g. "clock_in", "worker_lookup")
        operation: String,
        /// Transport-level description of the failure
        reason: String,
    },

    /// The request timed out before the backend answered.
    ///
    /// Treated identically to [`Network`](ClientError::Network) for retry
    /// purposes: the outcome of the request is unknown, and the operations
    /// this client performs are idempotent upserts.
    #[error("Request timed out during {operation} after {elapsed_ms}ms")]
    Timeout {
        /// The data-access operation that timed out
        operation: String,
        /// How long the request ran before the timeout fired
        elapsed_ms: u64,
    },

    /// The backend answered with a structured rejection.
    ///
    /// Row-level-security denials, malformed queries, and missing rows all
    /// land here. These are deterministic: retrying reproduces the identical
    /// failure, so the retry layer surfaces them immediately.
    ///
    /// # Fields
    /// - `code`: short backend identifier (e.g. `42501`, `PGRST116`)
    /// - `message`: human-readable text from the backend
    #[error("Backend rejected request [{code}]: {message}")]
    Backend {
        /// Short backend error identifier
        code: String,
        /// Human-readable text from the backend
        message: String,
    },

    /// No stored session, or the stored session token has expired.
    ///
    /// Both cases route the user back to login; no silent refresh is
    /// attempted. Non-retryable.
    #[error("Session is missing or expired")]
    SessionInvalid,

    /// Client configuration is missing or invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// An I/O error from the transport or local storage layer.
    ///
    /// The [`io::ErrorKind`] is preserved so classification can recognize
    /// connection-failure kinds as transient while treating the rest as
    /// non-retryable.
    #[error("I/O error during {operation}: {message}")]
    Io {
        /// The operation during which the I/O error occurred
        operation: String,
        /// The kind reported by the underlying [`io::Error`]
        kind: io::ErrorKind,
        /// Stringified source error
        message: String,
    },

    /// The backend's response could not be decoded.
    ///
    /// A response arrived but its body did not match any recognized shape.
    /// Fail closed: never retried, since the backend did answer.
    #[error("Malformed backend response: {message}")]
    Malformed {
        /// Description of the decoding failure
        message: String,
    },

    /// An error that matched no recognized shape.
    ///
    /// Treated conservatively as non-retryable to avoid masking unexpected
    /// bugs behind a retry loop.
    #[error("Unknown error: {message}")]
    Unknown {
        /// Stringified representation of the unrecognized failure
        message: String,
    },
}

impl From<io::Error> for ClientError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            operation: "io".to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed {
            message: err.to_string(),
        }
    }
}

/// Rich error context for user-friendly display.
///
/// Wraps a [`ClientError`] with optional suggestion and details text. The
/// suggestion tells the care worker what to do next; the details explain
/// what went wrong. All user-facing messaging flows through this type;
/// the retry layer itself never formats user text.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying client error
    pub error: ClientError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`ClientError`].
    ///
    /// This creates a basic context with no suggestion or details. Use the
    /// builder methods [`with_suggestion`](Self::with_suggestion) and
    /// [`with_details`](Self::with_details) to add user-friendly information.
    #[must_use]
    pub const fn new(error: ClientError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions should be actionable steps the user can take. They are
    /// displayed in green in the terminal to draw attention.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    ///
    /// Details provide context about why the error occurred. They are
    /// displayed in yellow, less prominent than the error or suggestion.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    ///
    /// Color coding:
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Checks for specific error types and attaches contextual suggestions.
/// Errors that are not a [`ClientError`] (or a recognized standard library
/// error) fall back to [`ClientError::Unknown`] with the stringified source.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(client_error) = error.downcast_ref::<ClientError>() {
        return create_error_context(client_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<io::Error>() {
        return create_error_context(ClientError::from(io::Error::new(
            io_error.kind(),
            io_error.to_string(),
        )));
    }

    ErrorContext::new(ClientError::Unknown {
        message: error.to_string(),
    })
    .with_suggestion("Try the action again; if the problem persists, contact support")
}

/// Attach per-variant suggestions and details to a [`ClientError`].
fn create_error_context(error: ClientError) -> ErrorContext {
    let (suggestion, details): (&str, Option<&str>) = match &error {
        ClientError::Network { .. } => (
            "Check the device's internet connection and try again",
            Some("The request never reached the server, so no data was changed"),
        ),

        ClientError::Timeout { .. } => (
            "Move to an area with better signal and try again",
            Some("The server did not answer in time"),
        ),

        ClientError::SessionInvalid => (
            "Sign in again to refresh your session",
            Some("Stored sessions expire after a period of inactivity"),
        ),

        ClientError::Backend { code, .. } if code == CODE_INSUFFICIENT_PRIVILEGE => (
            "Your account is not authorized for this record; contact your coordinator",
            Some("The server enforces per-row access control on care records"),
        ),

        ClientError::Backend { code, .. } if code == CODE_ROW_NOT_FOUND => (
            "Refresh the schedule and try again",
            Some("The record may have been removed or reassigned"),
        ),

        ClientError::Backend { code, .. } if code == CODE_JWT_EXPIRED => {
            ("Sign in again to refresh your session", None)
        }

        ClientError::Config { .. } => (
            "Check the client configuration file for missing or invalid values",
            None,
        ),

        ClientError::Backend { .. }
        | ClientError::Io { .. }
        | ClientError::Malformed { .. }
        | ClientError::Unknown { .. } => (
            "Try the action again; if the problem persists, contact support",
            None,
        ),
    };

    let context = ErrorContext::new(error).with_suggestion(suggestion);
    match details {
        Some(details) => context.with_details(details),
        None => context,
    }
}
