//! PropKart client entry point.
//!
//! Binary name: `propkart`
//!
//! Parses CLI arguments, loads config, wires the HTTP backend, then
//! dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    propkart_observe::init_tracing(cli.verbose, cli.quiet)?;

    let state = AppState::init(&cli).await?;

    match cli.command {
        Commands::Chat { page_path } => {
            cli::chat::loop_runner::run_chat_loop(&state, &page_path).await?;
        }
        Commands::History => {
            cli::history::show_history(&state, cli.json).await?;
        }
        Commands::Views { property_id } => {
            cli::views::show_views(&state, property_id, cli.json).await?;
        }
        Commands::Suggest { query } => {
            cli::suggest::suggest(&state, &query, cli.json).await?;
        }
    }

    Ok(())
}
