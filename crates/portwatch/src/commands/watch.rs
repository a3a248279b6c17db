//! `portwatch watch` -- poll continuously and print changes.

use tokio::signal;
use tracing::debug;

use portwatch_core::{Coordinator, CoordinatorConfig, FetchHealth};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

/// Connect, then print every snapshot replacement and every fetch-health
/// transition until Ctrl-C.
pub async fn run(config: CoordinatorConfig, format: OutputFormat) -> Result<(), CliError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.connect().await?;

    // The gating first fetch already populated the store.
    if let Some(snapshot) = coordinator.store().current() {
        print!("{}", output::render_snapshot(format, &snapshot));
    }

    let mut snapshots = coordinator.subscribe();
    let mut health = coordinator.store().subscribe_health();
    let mut last_health = coordinator.store().health();

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                debug!("interrupt received, shutting down");
                break;
            }
            changed = snapshots.changed() => {
                let Some(snapshot) = changed else { break };
                println!("-- {} --", snapshot.fetched_at.format("%H:%M:%S"));
                print!("{}", output::render_snapshot(format, &snapshot));
            }
            result = health.changed() => {
                if result.is_err() {
                    break;
                }
                let current = health.borrow_and_update().clone();
                // Only transitions are worth a line; Ok after Ok is routine.
                let entered_failure = current.is_failed() && !last_health.is_failed();
                let recovered = last_health.is_failed() && current == FetchHealth::Ok;
                if entered_failure || recovered {
                    eprintln!("{}", output::render_health(&current));
                }
                last_health = current;
            }
        }
    }

    coordinator.disconnect().await;
    Ok(())
}
