// Wire types for the `/api/ha/status` payload.
//
// Every field the server may omit gets a serde default so a sparse
// payload still decodes. Unknown fields are ignored -- the server adds
// fields between releases and old clients must keep working.

use serde::Deserialize;

/// The full status document returned by the portal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusPayload {
    /// `true` while at least one access request awaits admin approval.
    #[serde(default)]
    pub approval_pending: bool,

    #[serde(default)]
    pub pending_count: i64,

    #[serde(default)]
    pub approved_count: i64,

    #[serde(default)]
    pub tracked_count: i64,

    #[serde(default)]
    pub people_count: i64,

    /// People in provider order. Order is not stable across polls.
    #[serde(default)]
    pub people: Vec<PersonRecord>,
}

/// One person entry within a status document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonRecord {
    /// Stable identifier. Entries without one cannot be tracked.
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Phone currently seen on the network (ARP/DHCP presence).
    #[serde(default)]
    pub online: bool,

    /// MAC of the person's primary phone, when one has been detected.
    #[serde(default)]
    pub phone_mac: Option<String>,

    #[serde(default)]
    pub phone_count: i64,

    /// Contact photo as a self-contained data URI, not a fetchable URL.
    #[serde(default)]
    pub photo: Option<String>,
}
