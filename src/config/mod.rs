//! Configuration management for the shiftcare client.
//!
//! The client builds one [`ClientConfig`] at process start and injects it
//! into every component that performs data access. Nothing reads an ambient
//! global: passing the configuration explicitly keeps the retry and
//! classification logic testable in isolation with mock operations.
//!
//! # Configuration File
//!
//! **Location:**
//! - Unix/macOS: `~/.shiftcare/config.toml`
//! - Override: `SHIFTCARE_CONFIG_PATH` environment variable
//!
//! ```toml
//! backend_url = "https://example.supabase.co"
//! publishable_key = "sb_publishable_xxxxxxxx"
//!
//! [retry]
//! max_retries = 3
//! initial_delay_ms = 1000
//! max_delay_ms = 10000
//! ```
//!
//! Every field of the `[retry]` table is optional and falls back to the
//! client-wide defaults, so a minimal configuration only names the backend.
//!
//! # Security Model
//!
//! The configuration file carries the backend's publishable key only. It is
//! user-specific and never committed to version control; session tokens are
//! held by the platform's secure storage, not this file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_PATH_ENV, DEFAULT_INITIAL_DELAY_MS,
    DEFAULT_MAX_DELAY_MS, DEFAULT_MAX_RETRIES,
};
use crate::core::{ClientError, ClientResult};
use crate::retry::RetryOptions;

/// Retry policy settings as they appear in the configuration file.
///
/// This is the serde-facing mirror of [`RetryOptions`]: delays are plain
/// millisecond integers so the TOML stays readable. Convert with
/// [`RetryOptions::from`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrySettings {
    /// Maximum number of retry attempts after the initial try.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay, in milliseconds, before the first retry.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay, in milliseconds, between retries.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

const fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

const fn default_initial_delay_ms() -> u64 {
    DEFAULT_INITIAL_DELAY_MS
}

const fn default_max_delay_ms() -> u64 {
    DEFAULT_MAX_DELAY_MS
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl From<RetrySettings> for RetryOptions {
    fn from(settings: RetrySettings) -> Self {
        Self::default()
            .max_retries(settings.max_retries)
            .initial_delay(Duration::from_millis(settings.initial_delay_ms))
            .max_delay(Duration::from_millis(settings.max_delay_ms))
    }
}

/// Process-wide client configuration.
///
/// Constructed once during startup and passed to each component that
/// performs data access. The file is optional: [`load`](Self::load) falls
/// back to defaults when it is absent, and [`validate`](Self::validate)
/// reports what is still missing before the first backend call.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the hosted backend.
    #[serde(default)]
    pub backend_url: String,

    /// Publishable API key identifying this client to the backend.
    #[serde(default)]
    pub publishable_key: String,

    /// Retry policy applied to backend write operations.
    #[serde(default)]
    pub retry: RetrySettings,
}

impl ClientConfig {
    /// Determine the default configuration file path.
    ///
    /// Checks the `SHIFTCARE_CONFIG_PATH` environment variable first, then
    /// falls back to `~/.shiftcare/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the configuration from the default location.
    ///
    /// Returns the default configuration if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The default path cannot be determined
    /// - The file exists but cannot be read
    /// - The file contains invalid TOML syntax
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load the configuration from a specific file path.
    ///
    /// Primarily used in tests or when a custom configuration location is
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as the
    /// expected TOML schema.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read client config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse client config from {}", path.display()))
    }

    /// Save the configuration to a specific file path, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content =
            toml::to_string_pretty(self).context("Failed to serialize client config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write client config to {}", path.display()))
    }

    /// Check that the configuration names a backend.
    ///
    /// Called once at startup, before the first data-access call, so a
    /// missing backend surfaces as a configuration error rather than a
    /// confusing network failure later.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] naming the first missing or invalid
    /// field.
    pub fn validate(&self) -> ClientResult<()> {
        if self.backend_url.is_empty() {
            return Err(ClientError::Config {
                message: "backend_url is not set".to_string(),
            });
        }
        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(ClientError::Config {
                message: format!("backend_url is not a valid URL: {}", self.backend_url),
            });
        }
        if self.publishable_key.is_empty() {
            return Err(ClientError::Config {
                message: "publishable_key is not set".to_string(),
            });
        }
        Ok(())
    }
}
