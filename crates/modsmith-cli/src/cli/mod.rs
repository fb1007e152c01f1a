//! CLI command definitions for the `modsmith` binary.
//!
//! Uses clap derive macros for argument parsing. Running without a
//! subcommand starts the interactive design session; all design input is
//! gathered interactively, never through flags.

pub mod design;
pub mod prompt;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Design modules interactively and hand them to the installer.
#[derive(Parser)]
#[command(name = "modsmith", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start or resume an interactive module design session (default).
    Design,

    /// List saved module drafts.
    #[command(alias = "ls")]
    Drafts,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
