//! Stepwise CLI - apply append-only SQL schema migrations

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;

use cli::Cli;
use commands::common::ExitCode;
use commands::{hotel, migrate, status};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        cli::Commands::Migrate(args) => migrate::execute(args, &cli.global),
        cli::Commands::Status(args) => status::execute(args, &cli.global),
        cli::Commands::Hotel(args) => hotel::execute(args, &cli.global),
    };

    if let Err(err) = &result {
        if let Some(ExitCode(code)) = err.downcast_ref::<ExitCode>() {
            std::process::exit(*code);
        }
    }
    result
}

/// Route `log` output to stderr; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();
}
