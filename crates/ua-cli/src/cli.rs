//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Windows `UserAssist` artifact parser.
///
/// Decodes the run counts, focus times and session aggregates recorded under
/// the `UserAssist` key of a user's registry hive.
#[derive(Debug, Parser)]
#[command(name = "userassist", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory to also write the log file into (created if missing).
    #[arg(short = 'l', long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode a `UserAssist` dump into a CSV of records and a JSON of session aggregates.
    Parse {
        /// JSON dump of the `UserAssist` key (GUID -> values).
        input: PathBuf,

        /// CSV output file. The sessions file is written next to it.
        output: PathBuf,
    },

    /// Print the decoded `UEME_CTLSESSION` aggregates as JSON.
    Sessions {
        /// JSON dump of the `UserAssist` key (GUID -> values).
        input: PathBuf,
    },
}
