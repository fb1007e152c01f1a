//! modsmith CLI entry point.
//!
//! Binary name: `modsmith`
//!
//! Parses CLI arguments, initializes the database, then runs the
//! interactive design session (the default command) or one of the utility
//! commands.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,modsmith_core=debug,modsmith_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "modsmith", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (data dir, DB)
    let state = AppState::init().await?;

    match cli.command.unwrap_or(Commands::Design) {
        Commands::Design => {
            cli::design::run_design_session(&state).await?;
        }

        Commands::Drafts => {
            cli::design::list_drafts(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
