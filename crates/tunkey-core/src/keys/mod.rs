// ============================================
// File: crates/tunkey-core/src/keys/mod.rs
// ============================================
//! # Key Module
//!
//! ## Creation Reason
//! Groups the key material buffer, the key pair container and the
//! generators that fill them.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`material`]: `KeyMaterial` secure buffer and `KeyPolicy`
//! - [`pair`]: `KeyPair` owning a private and public buffer
//! - [`generator`]: `KeyPairGenerator` trait and `X25519Generator`
//!
//! ## Ownership
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  KeyPair                                 │
//! │  ├─ private: KeyMaterial (32 B scalar)   │
//! │  └─ public:  KeyMaterial (32 B u-coord)  │
//! │                                          │
//! │  drop(KeyPair) ──► wipe both buffers     │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Last Modified
//! v0.1.0 - Initial key module

pub mod generator;
pub mod material;
pub mod pair;

pub use generator::{KeyPairGenerator, X25519Generator};
pub use material::{KeyMaterial, KeyPolicy};
pub use pair::KeyPair;

// ============================================
// Constants
// ============================================

/// Size of an X25519 private or public key in bytes.
pub const KEY_SIZE: usize = 32;

/// Length of the base64 encoding of a key.
pub const ENCODED_KEY_LEN: usize = 44;
