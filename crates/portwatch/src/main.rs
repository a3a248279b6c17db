//! portwatch -- command-line viewer for captive-portal presence data.

mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "portwatch=info,portwatch_core=info",
        _ => "portwatch=debug,portwatch_core=debug,portwatch_api=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let file_config = config::load_config()?;
    let coordinator_config = config::resolve(&cli.global, &file_config)?;

    match cli.command {
        Command::Status => commands::status::run(coordinator_config, cli.global.output).await,
        Command::Watch => commands::watch::run(coordinator_config, cli.global.output).await,
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
