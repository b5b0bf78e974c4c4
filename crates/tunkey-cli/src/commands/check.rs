// ============================================
// File: crates/tunkey-cli/src/commands/check.rs
// ============================================
//! # Validation Commands
//!
//! ## Main Functionality
//! - `load_pair`: Builds the pair to check from a key file or key text
//! - `check`: Differential check of one pair against the reference tool
//! - `selftest`: Known vector plus N random pairs against the reference tool
//!
//! ## ⚠️ Important Note for Next Developer
//! - A missing `wg` is an error here, never a pass
//!
//! ## Last Modified
//! v0.1.0 - Initial validation commands

use std::path::Path;

use tracing::{debug, info};

use tunkey_core::{KeyMaterial, KeyPair, KeyPairGenerator, X25519Generator, KEY_SIZE};
use tunkey_validator::{PublicKeyOracle, ReferenceValidator, ValidatorError};

use crate::error::{CliError, Result};
use crate::keyfile::KeyFile;

/// Clamped private key from RFC 7748 section 6.1.
const VECTOR_PRIVATE: [u8; KEY_SIZE] = [
    0x70, 0x07, 0x6d, 0x0a, 0x73, 0x18, 0xa5, 0x7d,
    0x3c, 0x16, 0xc1, 0x72, 0x51, 0xb2, 0x66, 0x45,
    0xdf, 0x4c, 0x2f, 0x87, 0xeb, 0xc0, 0x99, 0x2a,
    0xb1, 0x77, 0xfb, 0xa5, 0x1d, 0xb9, 0x2c, 0x6a,
];

const VECTOR_PUBLIC: &str = "hSDwCYkwp1R0i33ctD73Wg2/Og0mOBr066SpjqqbTmo=";

/// Resolves the pair named on the command line.
///
/// Accepts a key file, a private/public pair, or a private key alone (the
/// public half is then derived locally).
///
/// # Errors
/// - `InvalidInput` for any other argument combination
/// - Key file and key decoding errors
pub async fn load_pair(
    key_file: Option<&Path>,
    private: Option<&str>,
    public: Option<&str>,
) -> Result<KeyPair> {
    match (key_file, private, public) {
        (Some(path), None, None) => KeyFile::load(path).await?.to_pair(),
        (None, Some(private), Some(public)) => Ok(KeyPair::create(
            KeyMaterial::from_encoded(private)?,
            KeyMaterial::from_encoded(public)?,
        )),
        (None, Some(private), None) => {
            let private = KeyMaterial::from_encoded(private)?;
            Ok(X25519Generator::new().generate_from_private(&private.raw_bytes()?)?)
        }
        _ => Err(CliError::invalid_input(
            "pass either --key-file, or --private with an optional --public",
        )),
    }
}

/// Checks `pair` against the reference.
///
/// # Errors
/// `Validator(ValidationMismatch)` on disagreement, plus every tool failure.
pub async fn check<O: PublicKeyOracle>(
    validator: &ReferenceValidator<O>,
    pair: &KeyPair,
) -> Result<String> {
    validator.ensure_valid(pair).await?;
    Ok(format!(
        "OK {} (matches {})",
        pair.public_key().encoded_form()?,
        validator.oracle().name()
    ))
}

/// Runs the known vector and `count` random pairs through the reference.
///
/// # Errors
/// - `Validator(ValidationMismatch)` on the first disagreement
/// - `Validator(ToolUnavailable)` if the reference cannot be run
pub async fn selftest<O: PublicKeyOracle>(
    validator: &ReferenceValidator<O>,
    count: usize,
) -> Result<String> {
    if !validator.is_tool_available().await {
        return Err(ValidatorError::unavailable(validator.oracle().name()).into());
    }

    let generator = X25519Generator::new();

    let vector = generator.generate_from_private(&VECTOR_PRIVATE)?;
    let local = vector.public_key().encoded_form()?;
    if local != VECTOR_PUBLIC {
        return Err(CliError::invalid_input(format!(
            "local derivation broken: expected {VECTOR_PUBLIC}, got {local}"
        )));
    }
    validator.ensure_valid(&vector).await?;
    debug!("Known vector matches reference");

    for i in 0..count {
        let pair = generator.generate_random()?;
        validator.ensure_valid(&pair).await?;
        debug!(round = i + 1, "Random pair matches reference");
    }

    info!(count, "Self-test passed");
    Ok(format!(
        "Self-test passed: known vector + {count} random pairs match {}",
        validator.oracle().name()
    ))
}

// ============================================
// Tests
// ============================================
