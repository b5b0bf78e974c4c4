// ============================================
// File: crates/tunkey-validator/src/error.rs
// ============================================
//! # Validator Error Types
//!
//! ## Creation Reason
//! Classifies every way a differential check against the reference
//! tool can fail, so callers can tell "tool missing" from "tool
//! disagreed" from "tool hung".
//!
//! ## Main Functionality
//! - `ValidatorError`: Primary error enum for validation
//! - Classification of tool failures vs key disagreement
//!
//! ## Error Categories
//! 1. **Tool Errors**: Missing, timed out, failed, silent, garbled
//! 2. **Verdict Errors**: Reference and local key disagree
//! 3. **System Errors**: Pipe I/O failures
//! 4. **Key Errors**: Wrapped `CoreError`
//!
//! ## ⚠️ Important Note for Next Developer
//! - Captured stderr is from the tool, it never contains our private key
//! - Do not add a retry classification; validation never retries
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use std::io;

use thiserror::Error;

use tunkey_core::CoreError;

// ============================================
// Result Type Alias
// ============================================

/// Result type for validator operations.
pub type Result<T> = std::result::Result<T, ValidatorError>;

// ============================================
// ValidatorError
// ============================================

/// Differential validation error types.
#[derive(Error, Debug)]
pub enum ValidatorError {
    // ========================================
    // Tool Errors
    // ========================================

    /// Reference tool could not be started or failed its version probe.
    #[error("Reference tool '{tool}' is not available")]
    ToolUnavailable {
        /// Program name
        tool: String,
    },

    /// Reference tool did not finish in time and was killed.
    #[error("Reference tool '{tool}' timed out after {timeout_ms}ms")]
    ToolTimeout {
        /// Program name
        tool: String,
        /// Budget that was exceeded
        timeout_ms: u64,
    },

    /// Reference tool exited with a failure status.
    #[error("Reference tool '{tool}' exited with {}: {stderr}", exit_label(.code))]
    ToolExitNonZero {
        /// Program name
        tool: String,
        /// Exit code, `None` if killed by a signal
        code: Option<i32>,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// Reference tool succeeded but printed nothing.
    #[error("Reference tool '{tool}' produced no output")]
    ToolNoOutput {
        /// Program name
        tool: String,
    },

    /// Reference tool printed something that is not a 32-byte key.
    #[error("Reference tool '{tool}' produced malformed output: {reason}")]
    ToolOutputMalformed {
        /// Program name
        tool: String,
        /// Why the output was rejected
        reason: String,
    },

    // ========================================
    // Verdict Errors
    // ========================================

    /// Local and reference public keys differ.
    #[error("Public key mismatch: reference derived {reference}")]
    ValidationMismatch {
        /// Public key computed by the reference tool
        reference: String,
    },

    // ========================================
    // Configuration Errors
    // ========================================

    /// A reference tool setting is unusable.
    #[error("Invalid reference tool configuration: {field} {reason}")]
    InvalidConfig {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: &'static str,
    },

    // ========================================
    // System Errors
    // ========================================

    /// Pipe or process I/O failed.
    #[error("I/O error: {context}")]
    Io {
        /// What was being done
        context: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    // ========================================
    // Wrapped Errors
    // ========================================

    /// Error from the key material layer.
    #[error(transparent)]
    Core(#[from] CoreError),
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("status {c}"))
}

impl ValidatorError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates an `InvalidConfig` error.
    pub const fn invalid_config(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidConfig { field, reason }
    }

    /// Creates a `ToolUnavailable` error.
    pub fn unavailable(tool: impl Into<String>) -> Self {
        Self::ToolUnavailable { tool: tool.into() }
    }

    /// Creates a `ToolTimeout` error.
    pub fn timeout(tool: impl Into<String>, timeout_ms: u64) -> Self {
        Self::ToolTimeout {
            tool: tool.into(),
            timeout_ms,
        }
    }

    /// Creates a `ToolExitNonZero` error.
    pub fn exit_non_zero(
        tool: impl Into<String>,
        code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::ToolExitNonZero {
            tool: tool.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Creates a `ToolNoOutput` error.
    pub fn no_output(tool: impl Into<String>) -> Self {
        Self::ToolNoOutput { tool: tool.into() }
    }

    /// Creates a `ToolOutputMalformed` error.
    pub fn malformed(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ToolOutputMalformed {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `Io` error with context.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if the reference tool itself failed.
    ///
    /// Such failures say nothing about whether the key is correct.
    #[must_use]
    pub const fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            Self::ToolUnavailable { .. }
                | Self::ToolTimeout { .. }
                | Self::ToolExitNonZero { .. }
                | Self::ToolNoOutput { .. }
                | Self::ToolOutputMalformed { .. }
        )
    }

    /// Returns `true` if the tool ran and disagreed with our key.
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::ValidationMismatch { .. })
    }
}

// ============================================
// Tests
// ============================================
