//! Reactive data layer between `portwatch-api` and view consumers.
//!
//! This crate owns the polling loop, domain model, and reconciliation
//! logic for the portwatch workspace:
//!
//! - **[`Coordinator`]** -- Per-host lifecycle facade:
//!   [`connect()`](Coordinator::connect) performs the gating first fetch,
//!   then spawns the background poll task. Each configured portal host
//!   gets its own coordinator with fully isolated state.
//!
//! - **[`SnapshotStore`]** -- Holds the latest decoded [`Snapshot`] (or
//!   none, before first success) plus the last fetch's [`FetchHealth`],
//!   both behind `tokio::sync::watch` channels so readers always see a
//!   whole snapshot and subscribers wake on replacement.
//!
//! - **Reconciler** ([`reconcile`]) -- Diffs each new snapshot's person
//!   identifiers against the coordinator-owned [`MaterializedSet`] and
//!   emits the identifiers that first became eligible for each view kind.
//!
//! - **Views** ([`view`]) -- Pure projections of (view kind, identifier,
//!   latest snapshot). They hold no state beyond identity and display
//!   metadata, and degrade to an explicit unknown (`None`) instead of
//!   guessing when the person or snapshot is missing.
//!
//! - **[`ViewRegistry`]** -- Consumes reconciler output after every
//!   successful poll and instantiates the corresponding views, exactly
//!   once per identifier per kind, for the life of the process.

pub mod config;
pub mod convert;
pub mod coordinator;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod registry;
pub mod store;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::CoordinatorConfig;
pub use coordinator::Coordinator;
pub use error::CoreError;
pub use reconcile::{MaterializedSet, NewlyEligible, ViewKind, reconcile};
pub use registry::ViewRegistry;
pub use store::{FetchHealth, SnapshotStore, SnapshotStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{MacAddress, Person, PersonId, Snapshot};
