use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{BoardArgs, ItemCommands, StageCommands};

/// Command-line front end for stage-grouped project boards
///
/// Stageboard groups the tasks, incidents and resource requests of a project
/// into ordered stage columns. Items are moved between stages and stages are
/// reordered the same way a drag-and-drop board would do it.
#[derive(Parser)]
#[command(version, about, name = "sb")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/stageboard/stageboard.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project whose board to work on
    #[arg(long, global = true, default_value_t = 1)]
    pub project: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Stageboard CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Show a board grouped by stage
    #[command(alias = "b")]
    Board(BoardArgs),
    /// Manage stages
    #[command(alias = "s")]
    Stage {
        #[command(subcommand)]
        command: StageCommands,
    },
    /// Manage items
    #[command(alias = "i")]
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },
}
