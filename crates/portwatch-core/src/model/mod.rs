// ── Domain model ──
//
// Canonical representations of what the portal reports. Wire payloads
// from `portwatch-api` are converted into these via `crate::convert`;
// nothing downstream of the store ever touches wire types.

pub mod ids;
pub mod person;
pub mod snapshot;

pub use ids::{MacAddress, PersonId};
pub use person::Person;
pub use snapshot::Snapshot;
