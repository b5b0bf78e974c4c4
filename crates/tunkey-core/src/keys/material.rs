// ============================================
// File: crates/tunkey-core/src/keys/material.rs
// ============================================
//! # Key Material Buffer
//!
//! ## Creation Reason
//! Wraps the 32 raw bytes of a private scalar or public point with an
//! explicit lifecycle: create, read, regenerate, wipe.
//!
//! ## Main Functionality
//! - `KeyMaterial`: Owned 32-byte buffer, wiped on drop
//! - `KeyPolicy`: Strict or permissive handling of bad-length input
//! - `fill_random`: Shared entry point to the OS random source
//!
//! ## Key Lifecycle
//! ```text
//! create(bytes) ──┐
//!                 ├──► valid ──regenerate()──► valid
//! create(None) ───┘      │
//!                        └──dispose() / drop──► disposed (all zero)
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Every accessor must check `disposed` first
//! - `dispose()` must stay infallible and idempotent
//! - Never print the buffer in `Debug`
//!
//! ## Last Modified
//! v0.1.0 - Initial key material implementation

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::warn;
use zeroize::Zeroize;

use super::KEY_SIZE;
use crate::error::{CoreError, Result};

// ============================================
// Random Source
// ============================================

/// Fills `buf` from the operating system's secure random source.
///
/// # Errors
/// Returns `GenerationFailure` if the OS refuses to supply entropy.
pub fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CoreError::generation(e.to_string()))
}

// ============================================
// KeyPolicy
// ============================================

/// How to treat caller-supplied bytes of the wrong length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPolicy {
    /// Fail with `InvalidKeyLength`.
    #[default]
    Strict,
    /// Substitute a fresh random key and log a warning.
    ///
    /// Compatibility mode for legacy callers only.
    Permissive,
}

// ============================================
// KeyMaterial
// ============================================

/// Exactly 32 bytes of key data with wipe-on-disposal.
///
/// # Security
/// - Zeroed by `dispose()` and again on drop
/// - Not `Clone`: the owner holds the only copy in this type
/// - Equality is constant time
///
/// # Example
/// ```
/// use tunkey_core::KeyMaterial;
///
/// let mut key = KeyMaterial::create(None).unwrap();
/// assert_eq!(key.encoded_form().unwrap().len(), 44);
///
/// key.dispose();
/// assert!(key.raw_bytes().is_err());
/// ```
pub struct KeyMaterial {
    bytes: [u8; KEY_SIZE],
    disposed: bool,
}

impl KeyMaterial {
    /// Creates key material from `bytes`, or from fresh randomness if `None`.
    ///
    /// # Errors
    /// - `InvalidKeyLength` if `bytes` is not exactly 32 bytes long
    /// - `GenerationFailure` if the random source fails
    pub fn create(bytes: Option<&[u8]>) -> Result<Self> {
        match bytes {
            Some(bytes) => Self::from_slice(bytes),
            None => Self::generate(),
        }
    }

    /// Like [`create`](Self::create), but applies `policy` to bad lengths.
    ///
    /// # Errors
    /// - `InvalidKeyLength` under `KeyPolicy::Strict`
    /// - `GenerationFailure` if the random source fails
    pub fn create_with_policy(bytes: Option<&[u8]>, policy: KeyPolicy) -> Result<Self> {
        match Self::create(bytes) {
            Err(CoreError::InvalidKeyLength { actual, .. }) if policy == KeyPolicy::Permissive => {
                warn!(
                    actual,
                    expected = KEY_SIZE,
                    "Bad key length, substituting a random key (permissive policy)"
                );
                Self::generate()
            }
            other => other,
        }
    }

    /// Creates key material from a 32-byte slice.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` if the slice is not 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(CoreError::invalid_length(KEY_SIZE, bytes.len()));
        }
        let mut buf = [0u8; KEY_SIZE];
        buf.copy_from_slice(bytes);
        Ok(Self::from_bytes(buf))
    }

    /// Takes ownership of a 32-byte array.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self {
            bytes,
            disposed: false,
        }
    }

    /// Creates key material filled from the secure random source.
    ///
    /// # Errors
    /// Returns `GenerationFailure` if the random source fails.
    pub fn generate() -> Result<Self> {
        let mut key = Self::from_bytes([0u8; KEY_SIZE]);
        fill_random(&mut key.bytes)?;
        Ok(key)
    }

    /// Parses the 44-character base64 form.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// - `InvalidEncoding` if the text is not base64
    /// - `InvalidKeyLength` if it does not decode to 32 bytes
    pub fn from_encoded(text: &str) -> Result<Self> {
        let mut decoded = BASE64.decode(text.trim())?;
        let key = Self::from_slice(&decoded);
        decoded.zeroize();
        key
    }

    /// Returns an independent copy of the 32 bytes.
    ///
    /// # Security Warning
    /// The returned array is not wiped automatically.
    ///
    /// # Errors
    /// Returns `DisposedAccess` after `dispose()`.
    pub fn raw_bytes(&self) -> Result<[u8; KEY_SIZE]> {
        self.check_live("raw_bytes")?;
        Ok(self.bytes)
    }

    /// Returns the standard padded base64 encoding (44 characters).
    ///
    /// # Errors
    /// Returns `DisposedAccess` after `dispose()`.
    pub fn encoded_form(&self) -> Result<String> {
        self.check_live("encoded_form")?;
        Ok(BASE64.encode(self.bytes))
    }

    /// Refills the buffer in place with fresh random bytes.
    ///
    /// On failure the previous contents are left untouched.
    ///
    /// # Errors
    /// - `DisposedAccess` after `dispose()`
    /// - `GenerationFailure` if the random source fails
    pub fn regenerate(&mut self) -> Result<()> {
        self.check_live("regenerate")?;
        let mut fresh = [0u8; KEY_SIZE];
        let filled = fill_random(&mut fresh);
        if filled.is_ok() {
            self.bytes.copy_from_slice(&fresh);
        }
        fresh.zeroize();
        filled
    }

    /// Zeroes the buffer and marks it invalid. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.bytes.zeroize();
        self.disposed = true;
    }

    /// Returns `true` once `dispose()` has run.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn check_live(&self, operation: &'static str) -> Result<()> {
        if self.disposed {
            return Err(CoreError::disposed(operation));
        }
        Ok(())
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.disposed {
            write!(f, "KeyMaterial(<disposed>)")
        } else {
            write!(f, "KeyMaterial([REDACTED])")
        }
    }
}

impl PartialEq for KeyMaterial {
    fn eq(&self, other: &Self) -> bool {
        self.disposed == other.disposed && bool::from(self.bytes[..].ct_eq(&other.bytes[..]))
    }
}

impl Eq for KeyMaterial {}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bytes() -> [u8; KEY_SIZE] {
        let mut bytes = [0u8; KEY_SIZE];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8 * 7 + 3;
        }
        bytes
    }

    #[test]
    fn test_create_from_bytes_roundtrip() {
        let bytes = sample_bytes();
        let key = KeyMaterial::create(Some(&bytes)).unwrap();

        assert_eq!(key.raw_bytes().unwrap(), bytes);

        let decoded = BASE64.decode(key.encoded_form().unwrap()).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_create_rejects_bad_lengths() {
        for len in [0usize, 1, 16, 31, 33, 64] {
            let bytes = vec![0xabu8; len];
            let err = KeyMaterial::create(Some(&bytes)).unwrap_err();
            assert_eq!(err, CoreError::invalid_length(KEY_SIZE, len));
        }
    }

    #[test]
    fn test_create_random_differs() {
        let a = KeyMaterial::create(None).unwrap();
        let b = KeyMaterial::create(None).unwrap();
        assert_ne!(a.raw_bytes().unwrap(), b.raw_bytes().unwrap());
    }

    #[test]
    fn test_permissive_policy_substitutes() {
        let key = KeyMaterial::create_with_policy(Some(&[1, 2, 3]), KeyPolicy::Permissive).unwrap();
        assert_eq!(key.raw_bytes().unwrap().len(), KEY_SIZE);

        let err = KeyMaterial::create_with_policy(Some(&[1, 2, 3]), KeyPolicy::Strict).unwrap_err();
        assert!(matches!(err, CoreError::InvalidKeyLength { actual: 3, .. }));
    }

    #[test]
    fn test_permissive_policy_keeps_valid_input() {
        let bytes = sample_bytes();
        let key = KeyMaterial::create_with_policy(Some(&bytes), KeyPolicy::Permissive).unwrap();
        assert_eq!(key.raw_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_encoded_form_shape() {
        for _ in 0..64 {
            let key = KeyMaterial::generate().unwrap();
            let encoded = key.encoded_form().unwrap();
            assert_eq!(encoded.len(), 44);
            assert!(encoded.ends_with('='));
        }
    }

    #[test]
    fn test_raw_bytes_is_a_copy() {
        let bytes = sample_bytes();
        let key = KeyMaterial::from_bytes(bytes);

        let encoded = key.encoded_form().unwrap();

        let mut first = key.raw_bytes().unwrap();
        let second = key.raw_bytes().unwrap();
        first[0] ^= 0xff;

        assert_ne!(first, second);
        assert_eq!(second, bytes);
        assert_eq!(key.raw_bytes().unwrap(), bytes);
        assert_eq!(key.encoded_form().unwrap(), encoded);
    }

    #[test]
    fn test_regenerate_changes_bytes() {
        let mut key = KeyMaterial::from_bytes(sample_bytes());
        key.regenerate().unwrap();
        assert_ne!(key.raw_bytes().unwrap(), sample_bytes());
    }

    #[test]
    fn test_dispose_blocks_access() {
        let mut key = KeyMaterial::generate().unwrap();
        key.dispose();

        assert!(key.is_disposed());
        assert!(matches!(key.raw_bytes(), Err(CoreError::DisposedAccess { .. })));
        assert!(matches!(key.encoded_form(), Err(CoreError::DisposedAccess { .. })));
        assert!(matches!(key.regenerate(), Err(CoreError::DisposedAccess { .. })));

        // Second dispose is a no-op
        key.dispose();
        assert!(key.is_disposed());
    }

    #[test]
    fn test_dispose_zeroes_buffer() {
        let mut key = KeyMaterial::from_bytes([0x42; KEY_SIZE]);
        key.dispose();
        assert_eq!(key.bytes, [0u8; KEY_SIZE]);
    }

    #[test]
    fn test_from_encoded() {
        let bytes = sample_bytes();
        let encoded = BASE64.encode(bytes);

        let key = KeyMaterial::from_encoded(&format!("  {encoded}\n")).unwrap();
        assert_eq!(key.raw_bytes().unwrap(), bytes);

        assert!(matches!(
            KeyMaterial::from_encoded("not base64!"),
            Err(CoreError::InvalidEncoding { .. })
        ));
        assert!(matches!(
            KeyMaterial::from_encoded(&BASE64.encode([0u8; 16])),
            Err(CoreError::InvalidKeyLength { actual: 16, .. })
        ));
    }

    #[test]
    fn test_debug_redacts() {
        let mut key = KeyMaterial::from_bytes([0x42; KEY_SIZE]);
        let debug = format!("{key:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("42"));

        key.dispose();
        assert!(format!("{key:?}").contains("disposed"));
    }

    #[test]
    fn test_equality() {
        let a = KeyMaterial::from_bytes(sample_bytes());
        let b = KeyMaterial::from_bytes(sample_bytes());
        let c = KeyMaterial::from_bytes([0u8; KEY_SIZE]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_policy_deserialize() {
        let policy: KeyPolicy = serde_json::from_str("\"permissive\"").unwrap();
        assert_eq!(policy, KeyPolicy::Permissive);
        assert_eq!(KeyPolicy::default(), KeyPolicy::Strict);
    }
}
