// ============================================
// File: crates/tunkey-validator/src/tool.rs
// ============================================
//! # Reference Tool Oracle
//!
//! ## Creation Reason
//! Talks to the WireGuard `wg` binary (or a configured stand-in) using
//! its `pubkey` protocol.
//!
//! ## Protocol
//! ```text
//! $ wg --version                 probe, exit 0 = available
//! $ echo <private b64> | wg pubkey
//! <public b64>                   one line, exit 0
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - A non-zero exit is a failure even if something was printed
//! - The private key only ever travels over the child's stdin
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

use async_trait::async_trait;
use tracing::debug;
use zeroize::Zeroizing;

use crate::config::ReferenceToolConfig;
use crate::error::{Result, ValidatorError};
use crate::process::run_with_deadline;
use crate::traits::PublicKeyOracle;

// ============================================
// ReferenceTool
// ============================================

/// Subprocess-backed [`PublicKeyOracle`].
#[derive(Debug, Clone)]
pub struct ReferenceTool {
    config: ReferenceToolConfig,
}

impl ReferenceTool {
    /// Creates a tool from configuration.
    #[must_use]
    pub const fn new(config: ReferenceToolConfig) -> Self {
        Self { config }
    }

    /// The platform's `wg` with default settings.
    #[must_use]
    pub fn system() -> Self {
        Self::new(ReferenceToolConfig::default())
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ReferenceToolConfig {
        &self.config
    }
}

#[async_trait]
impl PublicKeyOracle for ReferenceTool {
    fn name(&self) -> &str {
        &self.config.program
    }

    async fn is_available(&self) -> bool {
        match run_with_deadline(
            &self.config.program,
            &self.config.version_args,
            b"",
            self.config.probe_timeout(),
        )
        .await
        {
            Ok(output) => {
                let ok = output.status.success();
                debug!(tool = %self.config.program, available = ok, "Probed reference tool");
                ok
            }
            Err(e) => {
                debug!(tool = %self.config.program, error = %e, "Reference tool probe failed");
                false
            }
        }
    }

    async fn derive_public_key(&self, private_encoded: &str) -> Result<String> {
        let program = &self.config.program;
        let input = Zeroizing::new(format!("{}\n", private_encoded.trim()).into_bytes());

        let output = run_with_deadline(
            program,
            &self.config.derive_args,
            &input,
            self.config.timeout(),
        )
        .await?;

        if !output.status.success() {
            return Err(ValidatorError::exit_non_zero(
                program.as_str(),
                output.status.code(),
                output.stderr_text(),
            ));
        }

        output
            .first_line()
            .ok_or_else(|| ValidatorError::no_output(program.as_str()))
    }
}

// ============================================
// Tests
// ============================================
