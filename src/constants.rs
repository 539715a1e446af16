//! Global constants used throughout the shiftcare-client codebase.
//!
//! This module contains retry parameters, backend error codes, and
//! configuration file locations that are used across multiple modules.
//! Defining them centrally improves maintainability and makes magic
//! numbers more discoverable.

/// Maximum number of retry attempts after the initial try.
///
/// Writes against the backend (clock events, worker lookups) are retried
/// at most this many times before the last failure is surfaced to the
/// caller.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Base delay before the first retry (1 second).
///
/// Subsequent delays double on each retry attempt.
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1_000;

/// Maximum delay between retries (10 seconds).
///
/// Exponential backoff delays are capped at this value to prevent
/// excessive wait times during retry operations.
pub const DEFAULT_MAX_DELAY_MS: u64 = 10_000;

/// Backend error code for an expired or invalid JWT.
///
/// Surfaced by the backend's REST layer when the stored session token is
/// no longer accepted. Routes the user back to login rather than being
/// retried.
pub const CODE_JWT_EXPIRED: &str = "PGRST301";

/// Backend error code for a singular query that matched no rows.
pub const CODE_ROW_NOT_FOUND: &str = "PGRST116";

/// Backend error code for a row-level-security rejection
/// (`insufficient_privilege`).
pub const CODE_INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Directory under the user's home that holds client configuration.
pub const CONFIG_DIR_NAME: &str = ".shiftcare";

/// Client configuration file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "SHIFTCARE_CONFIG_PATH";
