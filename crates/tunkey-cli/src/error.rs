// ============================================
// File: crates/tunkey-cli/src/error.rs
// ============================================
//! # CLI Error Types
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

use tunkey_core::CoreError;
use tunkey_validator::ValidatorError;

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load configuration from '{path}': {reason}")]
    ConfigLoad {
        path: String,
        reason: String,
    },

    #[error("Invalid configuration: {field} - {reason}")]
    ConfigInvalid {
        field: String,
        reason: String,
    },

    #[error("Invalid key file '{path}': {reason}")]
    KeyFile {
        path: String,
        reason: String,
    },

    #[error("Invalid input: {reason}")]
    InvalidInput {
        reason: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Validator(#[from] ValidatorError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn config_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn config_invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn key_file(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::KeyFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigLoad { .. } | Self::ConfigInvalid { .. })
    }

    /// Returns `true` if the reference tool disagreed with a key.
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::Validator(e) if e.is_mismatch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::config_load("/etc/tunkey/tunkey.toml", "file not found");
        assert!(err.to_string().contains("/etc/tunkey/tunkey.toml"));
    }

    #[test]
    fn test_error_classification() {
        let config_err = CliError::config_invalid("reference_tool.program", "cannot be empty");
        assert!(config_err.is_config_error());
        assert!(!config_err.is_mismatch());

        let mismatch: CliError = ValidatorError::ValidationMismatch {
            reference: "x".into(),
        }
        .into();
        assert!(mismatch.is_mismatch());
    }
}
