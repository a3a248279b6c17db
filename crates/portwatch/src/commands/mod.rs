//! Subcommand implementations.

pub mod status;
pub mod watch;
