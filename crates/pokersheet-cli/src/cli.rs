//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pokersheet_core::MalformedPolicy;

/// Turns typed poker session notes into a per-year sheet.
///
/// Reads a log of year markers (`2009`) and session entries
/// (`6/5 - Kennell's - +205(60)`), then writes one sheet section per year
/// with per-game totals.
#[derive(Debug, Parser)]
#[command(name = "pokersheet", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Session log to read (default: pokerdata).
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Sheet file to write (default: pokersheet.csv).
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// What to do with entries that fail to parse.
    #[arg(long, global = true, value_enum)]
    pub on_malformed: Option<OnMalformed>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands. Without one, `sheet` runs.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the per-year sheet.
    Sheet,

    /// Print per-year, per-game totals.
    Summary {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Malformed entry handling as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnMalformed {
    /// Stop at the first bad entry.
    Abort,
    /// Warn and keep going.
    Skip,
}

impl From<OnMalformed> for MalformedPolicy {
    fn from(value: OnMalformed) -> Self {
        match value {
            OnMalformed::Abort => Self::Abort,
            OnMalformed::Skip => Self::Skip,
        }
    }
}
