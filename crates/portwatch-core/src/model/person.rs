// ── Person domain type ──

use serde::{Deserialize, Serialize};

use super::ids::{MacAddress, PersonId};

/// The canonical Person type.
///
/// One entry of a snapshot's `people` list. A person without an `id`
/// still counts toward the aggregates but can never be materialized as
/// a per-person view, and a person without a `phone_mac` has no device
/// the portal could track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: Option<PersonId>,
    pub name: String,
    pub online: bool,
    pub phone_mac: Option<MacAddress>,
    pub phone_count: i64,
    /// Contact photo as a self-contained data URI.
    pub photo: Option<String>,
}

impl Person {
    /// `true` when this person can back presence / phone / tracker views:
    /// a stable id and at least one detected phone.
    pub fn is_trackable(&self) -> bool {
        self.id.is_some() && self.phone_mac.is_some()
    }
}
