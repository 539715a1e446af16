//! Core types and functionality for the shiftcare client.
//!
//! This module forms the foundation of the client's type system: the error
//! types shared by all data-access code and the pure classification logic
//! the retry layer builds on.
//!
//! # Architecture Overview
//!
//! ## Error Management
//!
//! The client uses a two-layer error handling system:
//! - **Strongly-typed errors** ([`ClientError`]) for precise handling in code
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable suggestions
//!   for the screens that present failures to care workers
//!
//! ## Failure Classification
//!
//! Raw backend failures are loosely shaped (an optional HTTP status, a JSON
//! body that may expose `code`/`message`). [`ClientError::from_response`]
//! maps them into the typed union, and [`classify()`] buckets every error into
//! [`FailureKind::Network`], [`FailureKind::Backend`], or
//! [`FailureKind::Unknown`] before the retry predicate inspects it.
//! Unrecognized shapes fail closed and are never retried.
//!
//! # Modules
//!
//! - [`error`] - [`ClientError`], [`ErrorContext`], [`user_friendly_error`]
//! - [`mod@classify`] - [`FailureKind`], [`classify()`], [`BackendErrorBody`]
//!
//! # Design Principles
//!
//! ## Error First Design
//! Every fallible operation returns a `Result` with meaningful error
//! information. The retry layer propagates the original error unchanged; no
//! failure is ever swallowed or wrapped.
//!
//! ## Classification Purity
//! Classification only reads the error value. This keeps the retry predicate
//! testable in isolation with synthetic failures, with no backend in sight.

pub mod classify;
pub mod error;

pub use classify::{BackendErrorBody, FailureKind, classify};
pub use error::{ClientError, ClientResult, ErrorContext, user_friendly_error};
