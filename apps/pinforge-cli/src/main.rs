//! # Pinforge CLI
//!
//! Quotes lapel pin and challenge coin orders from the command line.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        pinforge binary                                  │
//! │                                                                         │
//! │  argv ───► cli (clap) ───► commands ───► pinforge-core ───► stdout     │
//! │                               ▲                                         │
//! │  pinforge.toml ─┐             │                                         │
//! │                 ├──► config ──┘          logging ───► stderr            │
//! │  PINFORGE__*  ──┘                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod cli;
mod commands;
mod config;
mod logging;

use crate::config::CliConfig;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Configuration decides the default log level, so load it first
    let cfg = CliConfig::load(&args.config)?;
    logging::init(&cfg.log_level);
    debug!(?cfg, "Configuration loaded");

    // Dispatch to appropriate command handler
    match args.command {
        cli::Commands::Quote(quote) => commands::quote(&quote, &cfg)?,
        cli::Commands::MoldFee {
            line,
            size,
            quantity,
            two_sided,
        } => commands::mold_fee(line, &size, quantity, two_sided, &cfg)?,
        cli::Commands::Validate { line } => commands::validate(line, &cfg)?,
        cli::Commands::Catalog { line } => commands::catalog(line, &cfg)?,
    }

    Ok(())
}
