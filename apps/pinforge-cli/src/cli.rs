//! # Command-Line Interface
//!
//! clap definitions for the `pinforge` binary.
//!
//! ## Commands
//! ```text
//! pinforge [--config pinforge.toml]
//! ├── quote     --line --method --size --quantity [add-ons] [--rush] [--two-sided]
//! ├── mold-fee  --line --size --quantity [--two-sided]
//! ├── validate  [--line]
//! └── catalog   --line
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use pinforge_core::ProductLine;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pinforge", version, about = "Lapel pin and challenge coin quotes")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "pinforge.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Price an order and print the itemized breakdown
    Quote(QuoteArgs),

    /// Show the mold fee for a size and quantity
    MoldFee {
        #[arg(short, long, value_enum, default_value = "pins")]
        line: Line,

        /// Size label, e.g. 1.25
        #[arg(short, long)]
        size: String,

        #[arg(short, long)]
        quantity: i64,

        /// Two-sided design (coins only)
        #[arg(long)]
        two_sided: bool,
    },

    /// Check catalog integrity; exits non-zero on problems
    Validate {
        /// Only validate one product line
        #[arg(short, long, value_enum)]
        line: Option<Line>,
    },

    /// List methods, sizes, quantities and add-ons
    Catalog {
        #[arg(short, long, value_enum, default_value = "pins")]
        line: Line,
    },
}

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    #[arg(short, long, value_enum, default_value = "pins")]
    pub line: Line,

    /// Production method id (pins) or color option id (coins)
    #[arg(short, long)]
    pub method: String,

    /// Size label, e.g. 1.25
    #[arg(short, long)]
    pub size: String,

    #[arg(short, long)]
    pub quantity: i64,

    /// Plating option id (default: first free option)
    #[arg(long)]
    pub plating: Option<String>,

    /// Backing option id, pins only (default: first free option)
    #[arg(long)]
    pub backing: Option<String>,

    /// Packaging option id (default: first free option)
    #[arg(long)]
    pub packaging: Option<String>,

    /// Add the 20% rush surcharge
    #[arg(long)]
    pub rush: bool,

    /// Two-sided design (coins only)
    #[arg(long)]
    pub two_sided: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Pins,
    Coins,
}

impl From<Line> for ProductLine {
    fn from(line: Line) -> Self {
        match line {
            Line::Pins => ProductLine::Pins,
            Line::Coins => ProductLine::Coins,
        }
    }
}
