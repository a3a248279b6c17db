// ── Snapshot domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::PersonId;
use super::person::Person;

/// One fully-decoded status payload. Immutable; each successful poll
/// replaces the previous snapshot wholesale, never merges into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub approval_pending: bool,
    pub pending_count: i64,
    pub approved_count: i64,
    pub tracked_count: i64,
    pub people_count: i64,
    /// Provider order. Not stable across polls.
    pub people: Vec<Person>,
    /// When this snapshot was fetched (local clock).
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Look up a person by id.
    ///
    /// The portal should send at most one entry per id; if it ever sends
    /// duplicates, the first match in provider order wins for all lookups.
    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.people
            .iter()
            .find(|p| p.id.as_ref().is_some_and(|pid| pid == id))
    }
}
