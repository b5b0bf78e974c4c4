// ============================================
// File: crates/tunkey-core/src/keys/generator.rs
// ============================================
//! # Key Pair Generation
//!
//! ## Creation Reason
//! Abstracts "generate fresh" and "derive from a given private key"
//! behind one trait so callers never depend on the concrete algorithm,
//! and tests can swap in fixed-output doubles.
//!
//! ## Main Functionality
//! - `KeyPairGenerator`: Generation capability trait
//! - `X25519Generator`: Production implementation (clamp + ladder)
//!
//! ## Derivation
//! ```text
//! random 32 bytes ──clamp──► private scalar ──mul_base──► public u
//! caller 32 bytes ─────────► private scalar ──mul_base──► public u
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - `generate_from_private` must NOT clamp; the caller's bytes are kept as-is
//! - Implementations must be stateless so they can be shared across threads
//!
//! ## Last Modified
//! v0.1.0 - Initial generator implementation

use tracing::trace;
use zeroize::Zeroize;

use super::material::fill_random;
use super::{KeyMaterial, KeyPair, KEY_SIZE};
use crate::curve;
use crate::error::{CoreError, Result};

// ============================================
// KeyPairGenerator Trait
// ============================================

/// Capability to produce private/public key pairs.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; generation only touches
/// call-local buffers and the read-only curve parameters.
///
/// # Example
/// ```
/// use tunkey_core::{KeyPairGenerator, X25519Generator};
///
/// let generator = X25519Generator::new();
/// let pair = generator.generate_random().unwrap();
///
/// let private = pair.private_key().raw_bytes().unwrap();
/// let again = generator.generate_from_private(&private).unwrap();
/// assert_eq!(pair.public_key(), again.public_key());
/// ```
pub trait KeyPairGenerator: Send + Sync {
    /// Generates a pair from fresh randomness.
    ///
    /// # Errors
    /// Returns `GenerationFailure` if the random source fails.
    fn generate_random(&self) -> Result<KeyPair>;

    /// Derives the public key for caller-supplied private bytes.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` if `private_key` is not 32 bytes.
    fn generate_from_private(&self, private_key: &[u8]) -> Result<KeyPair>;
}

// ============================================
// X25519Generator
// ============================================

/// WireGuard-compatible X25519 key generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct X25519Generator;

impl X25519Generator {
    /// Creates a new generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn pair_for(scalar: [u8; KEY_SIZE]) -> KeyPair {
        let public = curve::mul_base(&scalar);
        KeyPair::create(KeyMaterial::from_bytes(scalar), KeyMaterial::from_bytes(public))
    }
}

impl KeyPairGenerator for X25519Generator {
    fn generate_random(&self) -> Result<KeyPair> {
        let mut scalar = [0u8; KEY_SIZE];
        fill_random(&mut scalar)?;
        curve::clamp(&mut scalar);

        trace!("Generated random X25519 key pair");
        let pair = Self::pair_for(scalar);
        scalar.zeroize();
        Ok(pair)
    }

    fn generate_from_private(&self, private_key: &[u8]) -> Result<KeyPair> {
        let mut scalar: [u8; KEY_SIZE] = private_key
            .try_into()
            .map_err(|_| CoreError::invalid_length(KEY_SIZE, private_key.len()))?;

        let pair = Self::pair_for(scalar);
        scalar.zeroize();
        Ok(pair)
    }
}

// ============================================
// Tests
// ============================================
