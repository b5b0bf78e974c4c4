// ============================================
// File: crates/tunkey-core/src/keys/pair.rs
// ============================================
//! # Key Pair
//!
//! Owns one private and one public [`KeyMaterial`]. Dropping or
//! disposing the pair wipes both halves.
//!
//! ## ⚠️ Important Note for Next Developer
//! - `create` does not check that the halves belong together; mismatched
//!   pairs are legitimate input for validator tests
//! - `describe()` is for humans, never for the wire
//!
//! ## Last Modified
//! v0.1.0 - Initial key pair container

use std::fmt;

use super::{KeyMaterial, KeyPairGenerator};
use crate::error::Result;

// ============================================
// KeyPair
// ============================================

/// A private key and its (claimed) public key.
#[derive(Debug, PartialEq, Eq)]
pub struct KeyPair {
    private: KeyMaterial,
    public: KeyMaterial,
}

impl KeyPair {
    /// Wraps two existing key buffers without checking the curve relation.
    #[must_use]
    pub const fn create(private: KeyMaterial, public: KeyMaterial) -> Self {
        Self { private, public }
    }

    /// Generates a fresh pair with `generator`.
    ///
    /// # Errors
    /// Propagates the generator's error.
    pub fn create_random<G>(generator: &G) -> Result<Self>
    where
        G: KeyPairGenerator + ?Sized,
    {
        generator.generate_random()
    }

    /// Derives the pair for `private_key` with `generator`.
    ///
    /// # Errors
    /// Propagates the generator's error (`InvalidKeyLength` for bad input).
    pub fn create_from_private<G>(generator: &G, private_key: &[u8]) -> Result<Self>
    where
        G: KeyPairGenerator + ?Sized,
    {
        generator.generate_from_private(private_key)
    }

    /// Returns the private half.
    #[must_use]
    pub const fn private_key(&self) -> &KeyMaterial {
        &self.private
    }

    /// Returns the public half.
    #[must_use]
    pub const fn public_key(&self) -> &KeyMaterial {
        &self.public
    }

    /// Wipes both halves. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.private.dispose();
        self.public.dispose();
    }

    /// Returns `true` once both halves are wiped.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.private.is_disposed() && self.public.is_disposed()
    }

    /// Human-readable rendering of both encoded keys.
    ///
    /// Diagnostic display only.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "PrivateKey: {}\nPublicKey:  {}",
            render(&self.private),
            render(&self.public)
        )
    }
}

fn render(key: &KeyMaterial) -> String {
    key.encoded_form()
        .unwrap_or_else(|_| "<disposed>".to_string())
}

impl fmt::Display for KeyPair {
    /// Shows the public key only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(public={})", render(&self.public))
    }
}

// ============================================
// Tests
// ============================================
