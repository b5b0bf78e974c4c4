// ============================================
// File: crates/tunkey-validator/src/traits.rs
// ============================================
//! # Oracle Trait
//!
//! ## Creation Reason
//! Abstracts "something trusted that can derive a public key", so the
//! validator can be tested against in-process doubles as well as the
//! real `wg` binary.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Implementations must be Send + Sync for use in async contexts
//! - `is_available` must never error; collapse failures to `false`
//!
//! ## Last Modified
//! v0.1.0 - Initial trait definition

use async_trait::async_trait;

use crate::error::Result;

// ============================================
// PublicKeyOracle Trait
// ============================================

/// A trusted, independent implementation of public key derivation.
#[async_trait]
pub trait PublicKeyOracle: Send + Sync {
    /// Name used in errors and logs.
    fn name(&self) -> &str;

    /// Returns `true` if the oracle can currently be used.
    async fn is_available(&self) -> bool;

    /// Derives the base64 public key for a base64 private key.
    ///
    /// # Errors
    /// Any classified tool failure.
    async fn derive_public_key(&self, private_encoded: &str) -> Result<String>;
}
