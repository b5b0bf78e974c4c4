// ============================================
// File: crates/tunkey-cli/src/main.rs
// ============================================
//! # tunkey Entry Point
//!
//! ## Creation Reason
//! Main entry point for the `tunkey` binary. Handles CLI parsing, logging
//! setup and configuration loading, then dispatches to `commands`.
//!
//! ## Usage
//! ```bash
//! tunkey genkey                          # private key, like `wg genkey`
//! tunkey genkey | tunkey pubkey          # public key, like `wg pubkey`
//! tunkey genpair --out /etc/tunkey/wg0.json
//! tunkey check --key-file /etc/tunkey/wg0.json
//! tunkey selftest --count 32             # needs `wg` on PATH
//! tunkey --config tunkey.toml validate
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Logs go to stderr; stdout carries keys only so it can be piped
//! - Exit code 2 means the reference tool disagreed, 1 is any other error
//!
//! ## Last Modified
//! v0.1.0 - Initial CLI implementation

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zeroize::Zeroizing;

use tunkey_cli::{commands, CliError, OutputFormat, TunkeyConfig};
use tunkey_validator::ReferenceValidator;

// ============================================
// CLI Definition
// ============================================

/// WireGuard-compatible key generation, checked against `wg`.
#[derive(Parser, Debug)]
#[command(name = "tunkey")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults are used if omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new private key
    Genkey {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Base64)]
        format: OutputFormat,
    },

    /// Read a private key from stdin and print its public key
    Pubkey {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Base64)]
        format: OutputFormat,
    },

    /// Generate a key pair
    Genpair {
        /// Save as a JSON key file instead of printing the private key
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Check a key pair against the reference tool
    Check {
        /// JSON key file written by `genpair --out`
        #[arg(short, long, conflicts_with_all = ["private", "public"])]
        key_file: Option<PathBuf>,

        /// Base64 private key
        #[arg(long)]
        private: Option<String>,

        /// Base64 public key (derived locally if omitted)
        #[arg(long, requires = "private")]
        public: Option<String>,
    },

    /// Check the known vector and random pairs against the reference tool
    Selftest {
        /// Number of random pairs
        #[arg(short = 'n', long, default_value_t = 16)]
        count: usize,
    },

    /// Validate configuration file
    Validate,
}

// ============================================
// Main
// ============================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = result {
        // No-op when run() already installed a subscriber
        init_logging("error");
        error!("{:#}", e);
        let code = match e.downcast_ref::<CliError>() {
            Some(err) if err.is_mismatch() => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = TunkeyConfig::load_or_default(cli.config.as_deref()).await?;
    init_logging(&config.logging.level);

    let output = match cli.command {
        Commands::Genkey { format } => commands::genkey(format)?,
        Commands::Pubkey { format } => {
            let input = read_stdin().await?;
            commands::pubkey(&input, config.keys.policy, format)?
        }
        Commands::Genpair { out } => commands::genpair(out.as_deref()).await?,
        Commands::Check {
            key_file,
            private,
            public,
        } => {
            let pair =
                commands::load_pair(key_file.as_deref(), private.as_deref(), public.as_deref())
                    .await?;
            let validator = ReferenceValidator::from_config(config.reference_tool);
            commands::check(&validator, &pair).await?
        }
        Commands::Selftest { count } => {
            let validator = ReferenceValidator::from_config(config.reference_tool);
            commands::selftest(&validator, count).await?
        }
        Commands::Validate => cmd_validate(cli.config.is_some(), &config),
    };

    println!("{output}");
    Ok(())
}

// ============================================
// Helper Functions
// ============================================

/// Summarizes the effective configuration.
fn cmd_validate(from_file: bool, config: &TunkeyConfig) -> String {
    let source = if from_file { "file" } else { "defaults" };
    let tool = &config.reference_tool;
    format!(
        "Configuration is valid ({source})\n\
         Keys:\n   Policy:         {:?}\n\
         Reference tool:\n   Program:        {}\n   Derive args:    {}\n   \
         Timeout:        {}ms (probe {}ms)\n\
         Logging:\n   Level:          {}",
        config.keys.policy,
        tool.program,
        tool.derive_args.join(" "),
        tool.timeout_ms,
        tool.probe_timeout_ms,
        config.logging.level,
    )
}

/// Reads all of stdin.
async fn read_stdin() -> anyhow::Result<Zeroizing<String>> {
    let mut input = Zeroizing::new(String::new());
    tokio::io::stdin().read_to_string(&mut input).await?;
    Ok(input)
}

/// Initializes the tracing subscriber on stderr.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}
