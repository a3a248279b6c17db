//! Clap derive structures for the `portwatch` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// portwatch -- watch who the captive portal sees on your network
#[derive(Debug, Parser)]
#[command(
    name = "portwatch",
    version,
    about = "View captive-portal presence data from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Portal hostname or IP (overrides config file)
    #[arg(long, short = 'H', env = "PORTWATCH_HOST", global = true)]
    pub host: Option<String>,

    /// Portal port
    #[arg(long, short = 'P', env = "PORTWATCH_PORT", global = true)]
    pub port: Option<u16>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PORTWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the portal status once and print it.
    ///
    /// Doubles as a connectivity probe: exits non-zero when the portal
    /// cannot be reached or answers garbage.
    Status,

    /// Poll the portal continuously and print changes as they happen.
    Watch,
}
