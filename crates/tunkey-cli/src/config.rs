// ============================================
// File: crates/tunkey-cli/src/config.rs
// ============================================
//! # CLI Configuration
//!
//! ## Creation Reason
//! Provides configuration management for the `tunkey` binary, loaded
//! from an optional TOML file.
//!
//! ## Configuration Sections
//! - `keys`: Handling of bad-length private keys
//! - `reference_tool`: How to invoke `wg` for validation
//! - `logging`: Log level
//!
//! ## Example Configuration
//! ```toml
//! [keys]
//! policy = "strict"
//!
//! [reference_tool]
//! program = "wg"
//! derive_args = ["pubkey"]
//! version_args = ["--version"]
//! probe_timeout_ms = 5000
//! timeout_ms = 10000
//!
//! [logging]
//! level = "info"
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - `policy = "permissive"` exists for legacy callers only; keep strict the default
//!
//! ## Last Modified
//! v0.1.0 - Initial configuration implementation

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use tunkey_core::KeyPolicy;
use tunkey_validator::{ReferenceToolConfig, ValidatorError};

use crate::error::{CliError, Result};

// ============================================
// TunkeyConfig
// ============================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TunkeyConfig {
    /// Key handling.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Reference tool settings.
    #[serde(default)]
    pub reference_tool: ReferenceToolConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TunkeyConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed or validated.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CliError::config_load(&path_str, e.to_string()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| CliError::config_load(&path_str, e.to_string()))?;

        config.validate()?;

        info!("Configuration loaded from {}", path_str);
        Ok(config)
    }

    /// Loads `path` if given, defaults otherwise.
    ///
    /// # Errors
    /// Returns error only if an explicitly given file is unusable.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path).await,
            None => Ok(Self::default()),
        }
    }

    /// Parses configuration from a string.
    ///
    /// # Errors
    /// Returns error if parsing or validation fails.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CliError::config_load("<string>", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns `ConfigInvalid` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        self.reference_tool.validate().map_err(|e| match e {
            ValidatorError::InvalidConfig { field, reason } => {
                CliError::config_invalid(format!("reference_tool.{field}"), reason)
            }
            other => CliError::from(other),
        })?;
        self.logging.validate()
    }

    /// Serializes configuration to a TOML string.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

// ============================================
// KeysConfig
// ============================================

/// Key handling section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeysConfig {
    /// Bad-length policy for private key input.
    #[serde(default)]
    pub policy: KeyPolicy,
}

// ============================================
// LoggingConfig
// ============================================

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(CliError::config_invalid(
                "logging.level",
                "must be one of trace, debug, info, warn, error",
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============================================
// Tests
// ============================================
