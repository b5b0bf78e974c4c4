// ============================================
// File: crates/tunkey-core/src/error.rs
// ============================================
//! # Core Error Types
//!
//! ## Creation Reason
//! Defines the error taxonomy for key material handling and key pair
//! generation in the tunkey core crate.
//!
//! ## Main Functionality
//! - `CoreError`: Primary error enum for key operations
//! - `Result<T>`: Type alias using `CoreError`
//!
//! ## Error Categories
//! 1. **Input Errors**: Wrong key length, malformed base64
//! 2. **Lifecycle Errors**: Access after the key was wiped
//! 3. **Entropy Errors**: Secure random source unavailable
//!
//! ## ⚠️ Important Note for Next Developer
//! - NEVER include key material in error messages
//! - `KeyMaterial::dispose` must stay infallible, do not add an error for it
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

// ============================================
// Result Type Alias
// ============================================

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

// ============================================
// CoreError
// ============================================

/// Core error types for key material operations.
///
/// # Security Note
/// Variants carry lengths and operation names only, never key bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Input was not exactly the required key length.
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Key material was read or mutated after it was wiped.
    #[error("Key material accessed after disposal: {operation}")]
    DisposedAccess {
        /// Operation that was attempted
        operation: &'static str,
    },

    /// The secure random source could not produce bytes.
    #[error("Key generation failed: {reason}")]
    GenerationFailure {
        /// Why the random source failed
        reason: String,
    },

    /// Encoded key text could not be decoded.
    #[error("Invalid key encoding: {reason}")]
    InvalidEncoding {
        /// Decoder error details
        reason: String,
    },
}

impl CoreError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates an `InvalidKeyLength` error.
    pub const fn invalid_length(expected: usize, actual: usize) -> Self {
        Self::InvalidKeyLength { expected, actual }
    }

    /// Creates a `DisposedAccess` error.
    pub const fn disposed(operation: &'static str) -> Self {
        Self::DisposedAccess { operation }
    }

    /// Creates a `GenerationFailure` error.
    pub fn generation(reason: impl Into<String>) -> Self {
        Self::GenerationFailure {
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidEncoding` error.
    pub fn encoding(reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            reason: reason.into(),
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if the caller supplied bad input.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidKeyLength { .. } | Self::InvalidEncoding { .. }
        )
    }

    /// Returns `true` if the error is fatal for the whole process.
    ///
    /// A missing entropy source will not recover by retrying.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::GenerationFailure { .. })
    }
}

impl From<base64::DecodeError> for CoreError {
    fn from(err: base64::DecodeError) -> Self {
        Self::encoding(err.to_string())
    }
}

// ============================================
// Tests
// ============================================
