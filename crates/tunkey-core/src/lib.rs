// ============================================
// File: crates/tunkey-core/src/lib.rs
// ============================================
//! # tunkey Core - WireGuard Key Material
//!
//! ## Creation Reason
//! Generates and manages Curve25519 (X25519) key material in the format
//! WireGuard uses: 32-byte clamped scalars, 32-byte public u-coordinates,
//! base64 for interchange.
//!
//! ## Main Functionality
//!
//! ### Curve Module ([`curve`])
//! - Immutable Curve25519 parameter table
//! - Scalar clamping and base point multiplication
//!
//! ### Keys Module ([`keys`])
//! - `KeyMaterial`: 32-byte buffer, wiped on drop
//! - `KeyPair`: private + public buffer pair
//! - `KeyPairGenerator` / `X25519Generator`: pair generation
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 tunkey-cli                          │
//! │                    │                                │
//! │         ┌──────────┴──────────┐                     │
//! │         ▼                     ▼                     │
//! │   tunkey-core  ◄──── tunkey-validator               │
//! │   You are here                                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Field arithmetic comes from curve25519-dalek, never reimplement it
//! - ALL key buffers MUST be wiped on drop
//! - Keys must match `wg pubkey` byte for byte (see tunkey-validator)
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod curve;
pub mod error;
pub mod keys;

// Re-export commonly used items
pub use curve::{CurveParameters, CURVE25519};
pub use error::{CoreError, Result};
pub use keys::{
    KeyMaterial, KeyPair, KeyPairGenerator, KeyPolicy, X25519Generator,
    ENCODED_KEY_LEN, KEY_SIZE,
};
