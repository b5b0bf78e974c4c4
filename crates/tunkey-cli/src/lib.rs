// ============================================
// File: crates/tunkey-cli/src/lib.rs
// ============================================
//! # tunkey CLI Library
//!
//! ## Creation Reason
//! Backs the `tunkey` binary: a `wg genkey` / `wg pubkey` workalike that
//! can also prove its output against the real `wg`.
//!
//! ## Main Functionality
//! - [`config`]: TOML configuration
//! - [`commands`]: One function per subcommand, returning stdout text
//! - [`keyfile`]: JSON key pair storage
//! - [`error`]: CLI error types
//!
//! ## Architecture Overview
//! ```text
//! main.rs ──► commands ──► tunkey-core        (generation)
//!                 │
//!                 └──────► tunkey-validator   (wg subprocess)
//! ```
//!
//! ## Last Modified
//! v0.1.0 - Initial CLI library

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod keyfile;

pub use commands::OutputFormat;
pub use config::TunkeyConfig;
pub use error::{CliError, Result};
pub use keyfile::KeyFile;
