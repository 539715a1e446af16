//! Failure classification for retry decisions.
//!
//! The retry layer never inspects raw backend payloads. Instead, every
//! failure is first mapped into a [`ClientError`] and then into one of three
//! [`FailureKind`] groups:
//!
//! - **Network**: no response was received (connectivity dropped, DNS
//!   failure, request aborted, timeout). Transient and retryable.
//! - **Backend**: the backend answered with a structured rejection
//!   (row-level-security denial, malformed query, missing row). Deterministic
//!   and never retried, since retrying reproduces the identical failure.
//! - **Unknown**: anything that matched no recognized shape. Fail closed:
//!   not retried, so a retry loop never masks an unexpected bug.
//!
//! Classification is pure: [`classify`] and [`ClientError::is_transient`]
//! only read the error value, which keeps the retry predicate testable with
//! synthetic failures.

use serde::Deserialize;
use std::io;

use super::error::ClientError;
use crate::constants::CODE_JWT_EXPIRED;

/// Classification group for a captured failure.
///
/// The default retry predicate retries [`Network`](FailureKind::Network)
/// failures only.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureKind {
    /// No response was received; the request may be retried safely.
    Network,
    /// The backend answered with a deterministic rejection.
    Backend,
    /// Unrecognized failure shape; treated as non-retryable.
    Unknown,
}

/// I/O error kinds that indicate a connection-level failure.
///
/// These surface when the transport gives up before any response arrives,
/// so they classify as network failures. Every other kind (permission
/// denied, invalid data, ...) is deterministic from the client's point of
/// view and is not retried.
const TRANSIENT_IO_KINDS: &[io::ErrorKind] = &[
    io::ErrorKind::ConnectionRefused,
    io::ErrorKind::ConnectionReset,
    io::ErrorKind::ConnectionAborted,
    io::ErrorKind::NotConnected,
    io::ErrorKind::BrokenPipe,
    io::ErrorKind::TimedOut,
    io::ErrorKind::UnexpectedEof,
    io::ErrorKind::HostUnreachable,
    io::ErrorKind::NetworkUnreachable,
    io::ErrorKind::NetworkDown,
];

/// Map a [`ClientError`] into its [`FailureKind`] group.
#[must_use]
pub fn classify(error: &ClientError) -> FailureKind {
    match error {
        ClientError::Network { .. } | ClientError::Timeout { .. } => FailureKind::Network,
        ClientError::Io { kind, .. } if TRANSIENT_IO_KINDS.contains(kind) => FailureKind::Network,
        ClientError::Backend { .. } | ClientError::SessionInvalid => FailureKind::Backend,
        ClientError::Config { .. }
        | ClientError::Io { .. }
        | ClientError::Malformed { .. }
        | ClientError::Unknown { .. } => FailureKind::Unknown,
    }
}

impl ClientError {
    /// Whether this failure is transient and eligible for automatic retry.
    ///
    /// This is the default `should_retry` predicate of
    /// [`RetryExecutor`](crate::retry::RetryExecutor): only failures that
    /// classify as [`FailureKind::Network`] are retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        classify(self) == FailureKind::Network
    }
}

/// Structured error payload returned by the backend's REST layer.
///
/// All fields are optional because the payload shape is not guaranteed;
/// classification fails closed when neither `code` nor `message` is present.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendErrorBody {
    /// Short error identifier (e.g. `PGRST301`, `42501`).
    pub code: Option<String>,
    /// Human-readable error text.
    pub message: Option<String>,
    /// Additional detail from the backend, if any.
    pub details: Option<String>,
    /// Remediation hint from the backend, if any.
    pub hint: Option<String>,
}

impl ClientError {
    /// Build a [`ClientError`] from a raw backend response.
    ///
    /// - No HTTP status means no response was ever received: the failure is
    ///   a [`ClientError::Network`] carrying the transport's reason text.
    /// - A status with a parseable error body becomes
    ///   [`ClientError::Backend`]; an expired-JWT code maps to
    ///   [`ClientError::SessionInvalid`] so callers route to login.
    /// - A status with an unrecognized body fails closed as
    ///   [`ClientError::Unknown`] and is never retried.
    #[must_use]
    pub fn from_response(status: Option<u16>, body: &str, operation: &str) -> Self {
        let Some(status) = status else {
            let reason = if body.trim().is_empty() {
                "connection failed before a response was received".to_string()
            } else {
                body.trim().to_string()
            };
            return Self::Network {
                operation: operation.to_string(),
                reason,
            };
        };

        match serde_json::from_str::<BackendErrorBody>(body) {
            Ok(parsed) if parsed.code.is_some() || parsed.message.is_some() => {
                let code = parsed.code.unwrap_or_else(|| status.to_string());
                if code == CODE_JWT_EXPIRED {
                    return Self::SessionInvalid;
                }
                Self::Backend {
                    code,
                    message: parsed.message.unwrap_or_default(),
                }
            }
            _ => Self::Unknown {
                message: format!("unrecognized error response (HTTP {status}): {}", body.trim()),
            },
        }
    }
}
