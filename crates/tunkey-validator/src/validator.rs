// ============================================
// File: crates/tunkey-validator/src/validator.rs
// ============================================
//! # Reference Validator
//!
//! ## Creation Reason
//! Confirms that a locally derived public key is byte-identical to the
//! one an independent, widely deployed implementation derives from the
//! same private key.
//!
//! ## Main Functionality
//! - `ReferenceValidator`: Differential check over any `PublicKeyOracle`
//! - `Verdict`: Match flag plus the reference key text
//!
//! ## Main Logical Flow
//! 1. Probe the oracle; unavailable is an error, never "invalid"
//! 2. Feed the pair's encoded private key to the oracle
//! 3. Decode the reference output and compare bytes in constant time
//!
//! ## Last Modified
//! v0.1.0 - Initial validator

use subtle::ConstantTimeEq;
use tracing::{debug, info};
use zeroize::Zeroizing;

use tunkey_core::{KeyMaterial, KeyPair};

use crate::config::ReferenceToolConfig;
use crate::error::{Result, ValidatorError};
use crate::tool::ReferenceTool;
use crate::traits::PublicKeyOracle;

// ============================================
// Verdict
// ============================================

/// Outcome of one differential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the reference agreed byte for byte
    pub matched: bool,
    /// Public key as derived by the reference
    pub reference_public_key: String,
}

// ============================================
// ReferenceValidator
// ============================================

/// Differential validator over a trusted oracle.
///
/// # Example
/// ```no_run
/// use tunkey_core::{KeyPair, X25519Generator};
/// use tunkey_validator::ReferenceValidator;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let validator = ReferenceValidator::system();
/// let pair = KeyPair::create_random(&X25519Generator::new())?;
///
/// if validator.is_tool_available().await {
///     assert!(validator.validate(&pair).await?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceValidator<O = ReferenceTool> {
    oracle: O,
}

impl ReferenceValidator<ReferenceTool> {
    /// Validator backed by the platform's `wg`.
    #[must_use]
    pub fn system() -> Self {
        Self::new(ReferenceTool::system())
    }

    /// Validator backed by a configured reference tool.
    #[must_use]
    pub const fn from_config(config: ReferenceToolConfig) -> Self {
        Self::new(ReferenceTool::new(config))
    }
}

impl<O: PublicKeyOracle> ReferenceValidator<O> {
    /// Creates a validator over `oracle`.
    #[must_use]
    pub const fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Returns the underlying oracle.
    #[must_use]
    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Returns `true` if the reference can be used. Never errors.
    pub async fn is_tool_available(&self) -> bool {
        self.oracle.is_available().await
    }

    /// Derives the public key through the reference.
    ///
    /// # Errors
    /// - `ToolUnavailable` if the availability probe fails
    /// - Any other classified tool failure from the oracle
    pub async fn derive_public_key_via_tool(&self, private_encoded: &str) -> Result<String> {
        if !self.oracle.is_available().await {
            return Err(ValidatorError::unavailable(self.oracle.name()));
        }
        self.oracle.derive_public_key(private_encoded).await
    }

    /// Runs the differential check and returns the full verdict.
    ///
    /// # Errors
    /// - Tool failures propagate unchanged
    /// - `ToolOutputMalformed` if the reference output is not a key
    /// - `Core(DisposedAccess)` if the pair was already wiped
    pub async fn check(&self, pair: &KeyPair) -> Result<Verdict> {
        let private = Zeroizing::new(pair.private_key().encoded_form()?);
        let local = pair.public_key().raw_bytes()?;

        let reference = self.derive_public_key_via_tool(&private).await?;
        let reference_key = KeyMaterial::from_encoded(&reference)
            .map_err(|e| ValidatorError::malformed(self.oracle.name(), e.to_string()))?;

        let matched = bool::from(reference_key.raw_bytes()?[..].ct_eq(&local[..]));
        debug!(tool = self.oracle.name(), matched, "Differential check complete");

        Ok(Verdict {
            matched,
            reference_public_key: reference,
        })
    }

    /// Returns `true` if the reference derives the pair's public key.
    ///
    /// # Errors
    /// Same as [`check`](Self::check); failures are never turned into `false`.
    pub async fn validate(&self, pair: &KeyPair) -> Result<bool> {
        Ok(self.check(pair).await?.matched)
    }

    /// Like [`validate`](Self::validate), but a mismatch is an error.
    ///
    /// # Errors
    /// `ValidationMismatch` if the keys differ, plus all `check` errors.
    pub async fn ensure_valid(&self, pair: &KeyPair) -> Result<()> {
        let verdict = self.check(pair).await?;
        if !verdict.matched {
            return Err(ValidatorError::ValidationMismatch {
                reference: verdict.reference_public_key,
            });
        }
        info!(tool = self.oracle.name(), "Key pair matches reference");
        Ok(())
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use tunkey_core::{KeyPairGenerator, X25519Generator, KEY_SIZE};

    use super::*;

    /// In-process oracle deriving with `X25519Generator`.
    struct InProcessOracle {
        available: bool,
    }

    #[async_trait]
    impl PublicKeyOracle for InProcessOracle {
        fn name(&self) -> &str {
            "in-process"
        }

        async fn is_available(&self) -> bool {
            self.available
        }

        async fn derive_public_key(&self, private_encoded: &str) -> Result<String> {
            let private = KeyMaterial::from_encoded(private_encoded)?;
            let pair = X25519Generator::new().generate_from_private(&private.raw_bytes()?)?;
            Ok(pair.public_key().encoded_form()?)
        }
    }

    /// Oracle that always answers with the same text.
    struct ConstantOracle(&'static str);

    #[async_trait]
    impl PublicKeyOracle for ConstantOracle {
        fn name(&self) -> &str {
            "constant"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn derive_public_key(&self, _private_encoded: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn oracle() -> ReferenceValidator<InProcessOracle> {
        ReferenceValidator::new(InProcessOracle { available: true })
    }

    #[tokio::test]
    async fn test_generated_pair_validates() {
        let pair = KeyPair::create_random(&X25519Generator::new()).unwrap();
        let validator = oracle();

        assert!(validator.validate(&pair).await.unwrap());
        validator.ensure_valid(&pair).await.unwrap();

        let verdict = validator.check(&pair).await.unwrap();
        assert_eq!(
            verdict.reference_public_key,
            pair.public_key().encoded_form().unwrap()
        );
    }

    #[tokio::test]
    async fn test_mismatched_pair_rejected() {
        let pair = KeyPair::create(
            KeyMaterial::generate().unwrap(),
            KeyMaterial::generate().unwrap(),
        );
        let validator = oracle();

        assert!(!validator.validate(&pair).await.unwrap());

        let err = validator.ensure_valid(&pair).await.unwrap_err();
        assert!(err.is_mismatch());
    }

    #[tokio::test]
    async fn test_unavailable_oracle_errors() {
        let pair = KeyPair::create_random(&X25519Generator::new()).unwrap();
        let validator = ReferenceValidator::new(InProcessOracle { available: false });

        assert!(!validator.is_tool_available().await);

        let err = validator.validate(&pair).await.unwrap_err();
        assert!(matches!(err, ValidatorError::ToolUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_malformed_reference_output() {
        let pair = KeyPair::create_random(&X25519Generator::new()).unwrap();

        let validator = ReferenceValidator::new(ConstantOracle("definitely not a key"));
        let err = validator.validate(&pair).await.unwrap_err();
        assert!(matches!(err, ValidatorError::ToolOutputMalformed { .. }));

        let validator = ReferenceValidator::new(ConstantOracle("AAAA"));
        let err = validator.validate(&pair).await.unwrap_err();
        assert!(matches!(err, ValidatorError::ToolOutputMalformed { .. }));
    }

    #[tokio::test]
    async fn test_compares_bytes_not_text() {
        // Same key bytes, extra whitespace in the reference text
        let pair = KeyPair::create(
            KeyMaterial::from_bytes([0u8; KEY_SIZE]),
            KeyMaterial::from_bytes([0u8; KEY_SIZE]),
        );
        let validator = ReferenceValidator::new(ConstantOracle(
            " AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA= ",
        ));
        assert!(validator.validate(&pair).await.unwrap());
    }

    #[tokio::test]
    async fn test_disposed_pair_errors() {
        let mut pair = KeyPair::create_random(&X25519Generator::new()).unwrap();
        pair.dispose();

        let err = oracle().validate(&pair).await.unwrap_err();
        assert!(matches!(err, ValidatorError::Core(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hanging_tool_times_out() {
        use std::time::{Duration, Instant};

        let validator = ReferenceValidator::from_config(
            ReferenceToolConfig::new("sh")
                .with_version_args(["-c", "exit 0"])
                .with_derive_args(["-c", "sleep 30"])
                .with_timeout(Duration::from_millis(500)),
        );
        let pair = KeyPair::create_random(&X25519Generator::new()).unwrap();

        let started = Instant::now();
        let err = validator.validate(&pair).await.unwrap_err();

        assert!(matches!(err, ValidatorError::ToolTimeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
