// ============================================
// File: crates/tunkey-validator/src/config.rs
// ============================================
//! # Reference Tool Configuration
//!
//! ## Creation Reason
//! Describes how to invoke the reference key tool, so tests and unusual
//! installations can point the validator at a different program.
//!
//! ## Example Configuration
//! ```toml
//! [reference_tool]
//! program = "wg"
//! derive_args = ["pubkey"]
//! version_args = ["--version"]
//! probe_timeout_ms = 5000
//! timeout_ms = 10000
//! ```
//!
//! ## Last Modified
//! v0.1.0 - Initial configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidatorError};

// ============================================
// Constants
// ============================================

/// Version probe budget.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Key derivation budget.
pub const DEFAULT_DERIVE_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================
// ReferenceToolConfig
// ============================================

/// How to run the reference tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceToolConfig {
    /// Executable name or path.
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments selecting "derive public key from stdin".
    #[serde(default = "default_derive_args")]
    pub derive_args: Vec<String>,

    /// Arguments for the availability probe.
    #[serde(default = "default_version_args")]
    pub version_args: Vec<String>,

    /// Availability probe timeout in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Derivation timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_program() -> String {
    let name = if cfg!(windows) { "wg.exe" } else { "wg" };
    name.to_string()
}

fn default_derive_args() -> Vec<String> {
    vec!["pubkey".to_string()]
}

fn default_version_args() -> Vec<String> {
    vec!["--version".to_string()]
}

fn default_probe_timeout_ms() -> u64 {
    duration_ms(DEFAULT_PROBE_TIMEOUT)
}

fn default_timeout_ms() -> u64 {
    duration_ms(DEFAULT_DERIVE_TIMEOUT)
}

pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl ReferenceToolConfig {
    /// Creates a configuration for `program` with default arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Sets the derive arguments.
    #[must_use]
    pub fn with_derive_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.derive_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the version probe arguments.
    #[must_use]
    pub fn with_version_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.version_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the derivation timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = duration_ms(timeout);
        self
    }

    /// Sets the probe timeout.
    #[must_use]
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout_ms = duration_ms(timeout);
        self
    }

    /// Derivation timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Probe timeout.
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfig` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(ValidatorError::invalid_config("program", "cannot be empty"));
        }
        if self.timeout_ms == 0 {
            return Err(ValidatorError::invalid_config(
                "timeout_ms",
                "must be greater than 0",
            ));
        }
        if self.probe_timeout_ms == 0 {
            return Err(ValidatorError::invalid_config(
                "probe_timeout_ms",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for ReferenceToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            derive_args: default_derive_args(),
            version_args: default_version_args(),
            probe_timeout_ms: default_probe_timeout_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

// ============================================
// Tests
// ============================================
