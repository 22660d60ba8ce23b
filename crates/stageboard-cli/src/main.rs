//! Stageboard CLI Application
//!
//! Command-line front end for stage-grouped project boards.

mod args;
mod cli;
mod handlers;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::BoardArgs;
use handlers::Cli;
use log::info;
use renderer::TerminalRenderer;
use stageboard_core::StoreBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        project,
        command,
    } = Args::parse();

    let store = StoreBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize board store")?;

    info!("Stageboard started for project {project}");

    let cli = Cli::new(project, store, TerminalRenderer::new(!no_color));

    match command {
        Some(Board(args)) => cli.show_board(args).await,
        Some(Stage { command }) => cli.handle_stage_command(command).await,
        Some(Item { command }) => cli.handle_item_command(command).await,
        None => cli.show_board(BoardArgs::default()).await,
    }
}
