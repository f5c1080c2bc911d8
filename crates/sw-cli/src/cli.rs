//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Stepwise - apply append-only SQL schema migrations
#[derive(Parser, Debug)]
#[command(name = "sw")]
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
    /// Enable verbose output (logs every applied statement)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override the database (file path or ":memory:")
    #[arg(long = "db", global = true, env = "STEPWISE_DB")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bring the database schema up to date
    Migrate(MigrateArgs),

    /// Show the stored schema version against the project's plan
    Status(StatusArgs),

    /// Demo: register a hotel and its rooms in a self-migrating database
    Hotel(HotelArgs),
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Skip comparing stored statement checksums against the schema files
    #[arg(long)]
    pub no_verify: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with code 1 when statements are pending or the database is ahead
    #[arg(long)]
    pub check: bool,
}

/// Arguments for the hotel demo
#[derive(Args, Debug)]
pub struct HotelArgs {
    /// Hotel name (created if it does not exist yet)
    pub name: String,

    /// Hotel street address
    pub address: String,

    /// Room numbers to add
    pub rooms: Vec<i32>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
