//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    boxes::BoxCommands, completions::CompletionsArgs, init::InitArgs, inv::InvCommands,
    loc::LocCommands, part::PartCommands,
};

#[derive(Parser)]
#[command(name = "pbin")]
#[command(author, version, about = "Partsbin inventory toolkit")]
#[command(
    long_about = "A command-line toolkit for tracking parts, boxes, and locations in a single-file SQLite inventory database."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Database file (default: PBIN_DB, then config, then ./inventory.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the inventory database
    Init(InitArgs),

    /// Location management
    #[command(subcommand)]
    Loc(LocCommands),

    /// Part catalog management
    #[command(subcommand)]
    Part(PartCommands),

    /// Box management
    #[command(subcommand)]
    Box(BoxCommands),

    /// Inventory management
    #[command(subcommand)]
    Inv(InvCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for commands that emit records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pick a sensible format per command
    Auto,
    /// Aligned table
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values
    Csv,
    /// Surrogate ids only, one per line
    Id,
}
