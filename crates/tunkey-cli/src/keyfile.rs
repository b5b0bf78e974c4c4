// ============================================
// File: crates/tunkey-cli/src/keyfile.rs
// ============================================
//! # Key File Storage
//!
//! ## Creation Reason
//! Persists a generated key pair as JSON so it can be checked later
//! against the reference tool.
//!
//! ## File Format
//! ```json
//! {
//!   "version": "1.0",
//!   "key_type": "x25519",
//!   "public_key": "<base64>",
//!   "private_key": "<base64>",
//!   "created_at": "1700000000Z"
//! }
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Files are written with mode 0600 on Unix
//! - The public key is stored as written; `check` is what verifies it
//!
//! ## Last Modified
//! v0.1.0 - Initial key file format

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroize;

use tunkey_core::{KeyMaterial, KeyPair};

use crate::error::{CliError, Result};

const KEY_FILE_VERSION: &str = "1.0";
const KEY_TYPE: &str = "x25519";

/// On-disk key pair.
#[derive(Serialize, Deserialize)]
pub struct KeyFile {
    pub version: String,
    pub key_type: String,
    pub public_key: String,
    pub private_key: String,
    pub created_at: String,
}

impl KeyFile {
    /// Snapshots a live key pair.
    ///
    /// # Errors
    /// Returns `Core(DisposedAccess)` if the pair was wiped.
    pub fn from_pair(pair: &KeyPair) -> Result<Self> {
        Ok(Self {
            version: KEY_FILE_VERSION.to_string(),
            key_type: KEY_TYPE.to_string(),
            public_key: pair.public_key().encoded_form()?,
            private_key: pair.private_key().encoded_form()?,
            created_at: timestamp(),
        })
    }

    /// Rebuilds the key pair without re-deriving the public half.
    ///
    /// # Errors
    /// Returns `Core(InvalidEncoding | InvalidKeyLength)` for bad key text.
    pub fn to_pair(&self) -> Result<KeyPair> {
        let private = KeyMaterial::from_encoded(&self.private_key)?;
        let public = KeyMaterial::from_encoded(&self.public_key)?;
        Ok(KeyPair::create(private, public))
    }

    /// Writes the file, creating parent directories.
    ///
    /// # Errors
    /// Returns `Io` on filesystem failure.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut content = serde_json::to_string_pretty(self)
            .map_err(|e| CliError::key_file(path.display().to_string(), e.to_string()))?;
        let written = tokio::fs::write(path, content.as_bytes()).await;
        content.zeroize();
        written?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = tokio::fs::metadata(path).await?.permissions();
            perms.set_mode(0o600);
            tokio::fs::set_permissions(path, perms).await?;
        }

        debug!(path = %path.display(), "Key file saved");
        Ok(())
    }

    /// Reads and checks a key file.
    ///
    /// # Errors
    /// - `Io` if the file cannot be read
    /// - `KeyFile` if it is not valid JSON or not an x25519 key file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let mut content = tokio::fs::read_to_string(path).await?;
        let parsed = serde_json::from_str::<Self>(&content);
        content.zeroize();

        let file = parsed.map_err(|e| CliError::key_file(&path_str, e.to_string()))?;
        if file.key_type != KEY_TYPE {
            return Err(CliError::key_file(
                path_str,
                format!("unsupported key type '{}'", file.key_type),
            ));
        }
        Ok(file)
    }
}

impl fmt::Debug for KeyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyFile")
            .field("version", &self.version)
            .field("key_type", &self.key_type)
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl Drop for KeyFile {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

/// Returns current time as `<unix seconds>Z`.
fn timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    format!("{}Z", duration.as_secs())
}

// ============================================
// Tests
// ============================================
