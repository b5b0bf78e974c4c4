// ============================================
// File: crates/tunkey-validator/src/lib.rs
// ============================================
//! # tunkey Validator - Differential Key Checking
//!
//! ## Creation Reason
//! Confirms locally generated keys against the WireGuard reference tool
//! (`wg pubkey`), byte for byte, without reimplementing it.
//!
//! ## Main Functionality
//!
//! ### Modules
//! - [`traits`]: `PublicKeyOracle` abstraction for testability
//! - [`tool`]: `wg` subprocess oracle
//! - [`process`]: Deadline-bounded subprocess runner
//! - [`validator`]: `ReferenceValidator` and `Verdict`
//! - [`config`]: Reference tool settings
//! - [`error`]: Validator error types
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 tunkey-cli                          │
//! │                    │                                │
//! │         ┌──────────┴──────────┐                     │
//! │         ▼                     ▼                     │
//! │   tunkey-core  ◄──── tunkey-validator               │
//! │                      You are here                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Platform Support
//! | Platform | Subprocess | Process-group kill |
//! |----------|------------|--------------------|
//! | Linux | ✅ | ✅ |
//! | macOS | ✅ | ✅ |
//! | Windows | ✅ | ❌ (direct child only) |
//!
//! ## ⚠️ Important Note for Next Developer
//! - Tool failures are errors, never a `false` verdict
//! - No retries anywhere; every failure surfaces immediately
//! - Always use the oracle trait in tests that do not need a real `wg`
//!
//! ## Last Modified
//! v0.1.0 - Initial validator implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod process;
pub mod tool;
pub mod traits;
pub mod validator;

// Re-export primary types
pub use config::ReferenceToolConfig;
pub use error::{Result, ValidatorError};
pub use tool::ReferenceTool;
pub use traits::PublicKeyOracle;
pub use validator::{ReferenceValidator, Verdict};
