// ============================================
// File: crates/tunkey-cli/src/commands/mod.rs
// ============================================
//! # Command Implementations
//!
//! ## Main Functionality
//! - `keys`: `genkey`, `pubkey`, `genpair`
//! - `check`: `check`, `selftest`
//!
//! ## ⚠️ Important Note for Next Developer
//! - Commands return their stdout text instead of printing, so tests can
//!   assert on it; `main.rs` does the printing
//!
//! ## Last Modified
//! v0.1.0 - Initial commands

pub mod check;
pub mod keys;

pub use check::{check, load_pair, selftest};
pub use keys::{genkey, genpair, pubkey};

use clap::ValueEnum;
use tunkey_core::KeyMaterial;

use crate::error::Result;

/// Output encoding for single keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 44-character padded base64, as used by `wg`
    #[default]
    Base64,
    /// 64 lowercase hex digits
    Hex,
}

impl OutputFormat {
    /// Renders `key` in this format.
    ///
    /// # Errors
    /// Returns `Core(DisposedAccess)` for wiped keys.
    pub fn render(self, key: &KeyMaterial) -> Result<String> {
        Ok(match self {
            Self::Base64 => key.encoded_form()?,
            Self::Hex => hex::encode(key.raw_bytes()?),
        })
    }
}
