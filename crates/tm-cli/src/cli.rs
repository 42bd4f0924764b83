//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tidemark - staged SQL schema migrations
#[derive(Parser, Debug)]
#[command(name = "tidemark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override database path (DuckDB file or :memory:)
    #[arg(short, long, global = true, env = "TIDEMARK_DATABASE")]
    pub database: Option<String>,

    /// Override migrations directory
    #[arg(long, global = true)]
    pub dir: Option<String>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new migration file
    New(NewArgs),

    /// Apply pending stages
    Up(StageArgs),

    /// Roll back applied stages
    Down(StageArgs),

    /// Show applied migrations grouped by stage
    Summary(SummaryArgs),
}

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Migration name; slugified into the file name
    pub name: String,
}

/// Arguments for the up and down commands
#[derive(Args, Debug, Default)]
pub struct StageArgs {
    /// Stages to run (default: stages from tidemark.yml)
    pub stages: Vec<String>,

    /// Only run this migration
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for the summary command
#[derive(Args, Debug, Default)]
pub struct SummaryArgs {
    /// Print the ledger as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
