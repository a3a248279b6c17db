//! `portwatch status` -- one-shot fetch and print.

use portwatch_core::{Coordinator, CoordinatorConfig};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

/// Fetch the portal status once and print it.
///
/// `connect()` performs the gating first fetch, so an unreachable portal
/// surfaces here as `CannotConnect` instead of an empty table.
pub async fn run(config: CoordinatorConfig, format: OutputFormat) -> Result<(), CliError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.connect().await?;

    if let Some(snapshot) = coordinator.store().current() {
        print!("{}", output::render_snapshot(format, &snapshot));
    }

    coordinator.disconnect().await;
    Ok(())
}
