// ============================================
// File: crates/tunkey-cli/src/commands/keys.rs
// ============================================
//! # Key Commands
//!
//! ## Main Functionality
//! - `genkey`: New clamped private key
//! - `pubkey`: Private key text in, public key out (like `wg pubkey`)
//! - `genpair`: Both halves, optionally saved as a key file
//!
//! ## ⚠️ Important Note for Next Developer
//! - `pubkey` never clamps its input. `wg pubkey` clamps internally, so the
//!   two only agree on clamped keys
//!
//! ## Last Modified
//! v0.1.0 - Initial key commands

use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::info;
use zeroize::Zeroizing;

use tunkey_core::{CoreError, KeyMaterial, KeyPair, KeyPairGenerator, KeyPolicy, X25519Generator};

use super::OutputFormat;
use crate::error::Result;
use crate::keyfile::KeyFile;

/// Generates a private key.
///
/// # Errors
/// Returns `Core(GenerationFailure)` if the random source fails.
pub fn genkey(format: OutputFormat) -> Result<String> {
    let pair = X25519Generator::new().generate_random()?;
    format.render(pair.private_key())
}

/// Derives the public key for base64 private key text.
///
/// Under `KeyPolicy::Permissive` a bad-length key is replaced by a random
/// one instead of failing.
///
/// # Errors
/// - `Core(InvalidEncoding)` if `private_text` is not base64
/// - `Core(InvalidKeyLength)` under the strict policy
pub fn pubkey(private_text: &str, policy: KeyPolicy, format: OutputFormat) -> Result<String> {
    let decoded = Zeroizing::new(BASE64.decode(private_text.trim()).map_err(CoreError::from)?);
    let private = KeyMaterial::create_with_policy(Some(decoded.as_slice()), policy)?;
    let scalar = Zeroizing::new(private.raw_bytes()?);

    let pair = X25519Generator::new().generate_from_private(scalar.as_slice())?;
    format.render(pair.public_key())
}

/// Generates a key pair and renders it, or saves it to `out`.
///
/// # Errors
/// - `Core(GenerationFailure)` if the random source fails
/// - `Io` if the key file cannot be written
pub async fn genpair(out: Option<&Path>) -> Result<String> {
    let pair = KeyPair::create_random(&X25519Generator::new())?;

    match out {
        Some(path) => {
            KeyFile::from_pair(&pair)?.save(path).await?;
            info!(path = %path.display(), "Key pair saved");
            Ok(format!(
                "PublicKey:  {}\nSaved to:   {}",
                pair.public_key().encoded_form()?,
                path.display()
            ))
        }
        None => Ok(pair.describe()),
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use tunkey_core::curve::is_clamped;

    use super::*;
    use crate::error::CliError;

    const PRIVATE: &str = "cAdtCnMYpX08FsFyUbJmRd9ML4frwJkqsXf7pR25LGo=";
    const PUBLIC: &str = "hSDwCYkwp1R0i33ctD73Wg2/Og0mOBr066SpjqqbTmo=";

    #[test]
    fn test_genkey_is_clamped() {
        let text = genkey(OutputFormat::Base64).unwrap();
        let key = KeyMaterial::from_encoded(&text).unwrap();
        assert!(is_clamped(&key.raw_bytes().unwrap()));

        assert_eq!(genkey(OutputFormat::Hex).unwrap().len(), 64);
    }

    #[test]
    fn test_pubkey_known_vector() {
        assert_eq!(
            pubkey(&format!("{PRIVATE}\n"), KeyPolicy::Strict, OutputFormat::Base64).unwrap(),
            PUBLIC
        );
        assert_eq!(
            pubkey(PRIVATE, KeyPolicy::Strict, OutputFormat::Hex).unwrap(),
            "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a"
        );
    }

    #[test]
    fn test_pubkey_bad_input() {
        let err = pubkey("!!!", KeyPolicy::Strict, OutputFormat::Base64).unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::InvalidEncoding { .. })));

        let err = pubkey("AAAA", KeyPolicy::Strict, OutputFormat::Base64).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(CoreError::InvalidKeyLength { actual: 3, .. })
        ));
    }

    #[test]
    fn test_pubkey_permissive_substitutes() {
        let first = pubkey("AAAA", KeyPolicy::Permissive, OutputFormat::Base64).unwrap();
        let second = pubkey("AAAA", KeyPolicy::Permissive, OutputFormat::Base64).unwrap();
        assert_eq!(first.len(), 44);
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_genpair_to_stdout() {
        let text = genpair(None).await.unwrap();
        assert!(text.starts_with("PrivateKey: "));
        assert!(text.contains("\nPublicKey:  "));
    }

    #[tokio::test]
    async fn test_genpair_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wg0.json");

        let text = genpair(Some(&path)).await.unwrap();
        assert!(!text.contains("PrivateKey"));

        let pair = KeyFile::load(&path).await.unwrap().to_pair().unwrap();
        let derived = pubkey(
            &pair.private_key().encoded_form().unwrap(),
            KeyPolicy::Strict,
            OutputFormat::Base64,
        )
        .unwrap();
        assert_eq!(derived, pair.public_key().encoded_form().unwrap());
        assert!(text.contains(&derived));
    }
}
