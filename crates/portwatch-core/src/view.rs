// ── Entity view projections ──
//
// Every view is a pure function of (view kind, stable identifier,
// latest snapshot). Views own nothing but identity and display
// metadata; all values and attributes are recomputed from the snapshot
// on every read. A missing snapshot or a person absent from the current
// snapshot projects to an explicit unknown (`None`) -- never `false`,
// never a panic. "Offline" is information the provider sent; "unknown"
// is the absence of any information.

use serde_json::{Map, Value, json};

use crate::model::{MacAddress, PersonId, Snapshot};
use crate::reconcile::ViewKind;

/// Lowercase a display name into an entity key fragment:
/// spaces become underscores, everything but `[a-z0-9_]` is dropped.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Stable identity and display metadata for one view.
///
/// Assigned at creation and never recomputed -- renames on the portal
/// side do not move an already-materialized view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewIdentity {
    /// Globally unique, host-scoped id (`{host_key}_{kind}_{person_id}`).
    pub unique_id: String,
    /// Human-oriented key (`{slug}_presence` and the like).
    pub entity_key: String,
    pub display_name: String,
}

// ── Aggregate count views ───────────────────────────────────────────

/// The four always-present count views, one set per configured host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    PendingRequests,
    ApprovedUsers,
    TrackedDevices,
    People,
}

impl CountKind {
    pub const ALL: [Self; 4] = [
        Self::PendingRequests,
        Self::ApprovedUsers,
        Self::TrackedDevices,
        Self::People,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::PendingRequests => "pending_requests",
            Self::ApprovedUsers => "approved_users",
            Self::TrackedDevices => "tracked_devices",
            Self::People => "people",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::PendingRequests => "Pending Requests",
            Self::ApprovedUsers => "Approved Users",
            Self::TrackedDevices => "Tracked Devices",
            Self::People => "People",
        }
    }
}

/// Numeric sensor projecting one aggregate count field.
#[derive(Debug, Clone)]
pub struct CountView {
    pub identity: ViewIdentity,
    kind: CountKind,
}

impl CountView {
    pub fn new(host_key: &str, kind: CountKind) -> Self {
        Self {
            identity: ViewIdentity {
                unique_id: format!("{host_key}_{}", kind.token()),
                entity_key: format!("captive_portal_{}", kind.token()),
                display_name: format!("Captive Portal {}", kind.display_name()),
            },
            kind,
        }
    }

    pub fn kind(&self) -> CountKind {
        self.kind
    }

    /// The count, or `None` while no snapshot has ever succeeded.
    pub fn value(&self, snapshot: Option<&Snapshot>) -> Option<i64> {
        let snap = snapshot?;
        Some(match self.kind {
            CountKind::PendingRequests => snap.pending_count,
            CountKind::ApprovedUsers => snap.approved_count,
            CountKind::TrackedDevices => snap.tracked_count,
            CountKind::People => snap.people_count,
        })
    }
}

// ── Approval-pending indicator ──────────────────────────────────────

/// Binary indicator that turns on while any access request awaits
/// admin approval. One per configured host.
#[derive(Debug, Clone)]
pub struct ApprovalView {
    pub identity: ViewIdentity,
}

impl ApprovalView {
    pub fn new(host_key: &str) -> Self {
        Self {
            identity: ViewIdentity {
                unique_id: format!("{host_key}_approval_pending"),
                entity_key: "captive_portal_approval_pending".into(),
                display_name: "Captive Portal Approval Pending".into(),
            },
        }
    }

    pub fn is_on(&self, snapshot: Option<&Snapshot>) -> Option<bool> {
        snapshot.map(|s| s.approval_pending)
    }

    pub fn attributes(&self, snapshot: Option<&Snapshot>) -> Map<String, Value> {
        let mut attrs = Map::new();
        if let Some(snap) = snapshot {
            attrs.insert("pending_count".into(), json!(snap.pending_count));
        }
        attrs
    }
}

// ── Per-person views ────────────────────────────────────────────────

fn person_identity(host_key: &str, kind: ViewKind, id: &PersonId, name: &str) -> ViewIdentity {
    let slug = slugify(name);
    let (entity_key, display_name) = match kind {
        ViewKind::Presence => (format!("{slug}_presence"), format!("{name} Presence")),
        ViewKind::Phone => (format!("{slug}_phone"), format!("{name} Phone")),
        ViewKind::Tracker => (slug, name.to_owned()),
    };
    ViewIdentity {
        unique_id: format!("{host_key}_{}_{id}", kind.token()),
        entity_key,
        display_name,
    }
}

/// Shared per-read attribute map for person-backed views.
fn person_attributes(id: &PersonId, name: &str, snapshot: Option<&Snapshot>) -> Map<String, Value> {
    let mut attrs = Map::new();
    attrs.insert("person_id".into(), json!(id.as_str()));
    attrs.insert("person_name".into(), json!(name));

    if let Some(person) = snapshot.and_then(|s| s.person(id)) {
        attrs.insert(
            "phone_mac".into(),
            json!(person.phone_mac.as_ref().map(MacAddress::as_str)),
        );
        attrs.insert("phone_count".into(), json!(person.phone_count));
        attrs.insert("online".into(), json!(person.online));
        attrs.insert("has_photo".into(), json!(person.photo.is_some()));
    }

    attrs
}

fn person_photo(id: &PersonId, snapshot: Option<&Snapshot>) -> Option<String> {
    snapshot?.person(id)?.photo.clone()
}

/// Binary presence view for one person.
#[derive(Debug, Clone)]
pub struct PersonPresenceView {
    pub identity: ViewIdentity,
    id: PersonId,
    name: String,
}

impl PersonPresenceView {
    pub fn new(host_key: &str, id: PersonId, name: &str) -> Self {
        Self {
            identity: person_identity(host_key, ViewKind::Presence, &id, name),
            id,
            name: name.to_owned(),
        }
    }

    pub fn person_id(&self) -> &PersonId {
        &self.id
    }

    /// `Some(online)` while the person appears in the current snapshot,
    /// `None` (unknown) when they have vanished or no snapshot exists.
    pub fn is_on(&self, snapshot: Option<&Snapshot>) -> Option<bool> {
        Some(snapshot?.person(&self.id)?.online)
    }

    pub fn entity_picture(&self, snapshot: Option<&Snapshot>) -> Option<String> {
        person_photo(&self.id, snapshot)
    }

    pub fn attributes(&self, snapshot: Option<&Snapshot>) -> Map<String, Value> {
        person_attributes(&self.id, &self.name, snapshot)
    }
}

/// Phone MAC view for one person.
#[derive(Debug, Clone)]
pub struct PersonPhoneView {
    pub identity: ViewIdentity,
    id: PersonId,
    name: String,
}

impl PersonPhoneView {
    pub fn new(host_key: &str, id: PersonId, name: &str) -> Self {
        Self {
            identity: person_identity(host_key, ViewKind::Phone, &id, name),
            id,
            name: name.to_owned(),
        }
    }

    pub fn person_id(&self) -> &PersonId {
        &self.id
    }

    /// The phone MAC, or `None` when the person or snapshot is missing.
    pub fn value(&self, snapshot: Option<&Snapshot>) -> Option<MacAddress> {
        snapshot?.person(&self.id)?.phone_mac.clone()
    }

    pub fn entity_picture(&self, snapshot: Option<&Snapshot>) -> Option<String> {
        person_photo(&self.id, snapshot)
    }

    pub fn attributes(&self, snapshot: Option<&Snapshot>) -> Map<String, Value> {
        person_attributes(&self.id, &self.name, snapshot)
    }
}

/// Router-sourced device tracker for one person.
///
/// Pure projection, same lookup as the presence view; only the exposed
/// vocabulary differs (connected / source type).
#[derive(Debug, Clone)]
pub struct PersonTrackerView {
    pub identity: ViewIdentity,
    id: PersonId,
    name: String,
}

impl PersonTrackerView {
    pub fn new(host_key: &str, id: PersonId, name: &str) -> Self {
        Self {
            identity: person_identity(host_key, ViewKind::Tracker, &id, name),
            id,
            name: name.to_owned(),
        }
    }

    pub fn person_id(&self) -> &PersonId {
        &self.id
    }

    /// Presence is derived from the portal's ARP/DHCP view of the network.
    pub fn source_type(&self) -> &'static str {
        "router"
    }

    pub fn is_connected(&self, snapshot: Option<&Snapshot>) -> Option<bool> {
        Some(snapshot?.person(&self.id)?.online)
    }

    pub fn entity_picture(&self, snapshot: Option<&Snapshot>) -> Option<String> {
        person_photo(&self.id, snapshot)
    }

    pub fn attributes(&self, snapshot: Option<&Snapshot>) -> Map<String, Value> {
        let mut attrs = person_attributes(&self.id, &self.name, snapshot);
        attrs.insert("source".into(), json!("captive_portal"));
        attrs
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Person;
    use chrono::Utc;

    fn snapshot() -> Snapshot {
        Snapshot {
            approval_pending: true,
            pending_count: 2,
            approved_count: 7,
            tracked_count: 3,
            people_count: 1,
            people: vec![Person {
                id: Some(PersonId::from("1")),
                name: "Alice".into(),
                online: true,
                phone_mac: Some(MacAddress::new("AA:BB:CC:DD:EE:FF")),
                phone_count: 1,
                photo: Some("data:image/png;base64,xyz".into()),
            }],
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn slugify_matches_portal_naming() {
        assert_eq!(slugify("Alice Smith"), "alice_smith");
        assert_eq!(slugify("Jörg O'Brien-2"), "jrg_obrien2");
    }

    #[test]
    fn count_views_project_fields() {
        let snap = snapshot();
        let values: Vec<Option<i64>> = CountKind::ALL
            .iter()
            .map(|k| CountView::new("portal", *k).value(Some(&snap)))
            .collect();
        assert_eq!(values, vec![Some(2), Some(7), Some(3), Some(1)]);
    }

    #[test]
    fn count_view_unknown_without_snapshot() {
        let view = CountView::new("portal", CountKind::People);
        assert_eq!(view.value(None), None);
    }

    #[test]
    fn approval_view_projects_flag_and_attribute() {
        let snap = snapshot();
        let view = ApprovalView::new("portal");

        assert_eq!(view.is_on(Some(&snap)), Some(true));
        assert_eq!(view.attributes(Some(&snap))["pending_count"], json!(2));
        assert_eq!(view.is_on(None), None);
        assert!(view.attributes(None).is_empty());
    }

    #[test]
    fn presence_view_reads_online_flag() {
        let snap = snapshot();
        let view = PersonPresenceView::new("portal", PersonId::from("1"), "Alice");

        assert_eq!(view.is_on(Some(&snap)), Some(true));
        assert_eq!(view.identity.unique_id, "portal_presence_1");
        assert_eq!(view.identity.entity_key, "alice_presence");
        assert_eq!(view.identity.display_name, "Alice Presence");
    }

    #[test]
    fn vanished_person_is_unknown_not_offline() {
        let mut snap = snapshot();
        snap.people.clear();

        let presence = PersonPresenceView::new("portal", PersonId::from("1"), "Alice");
        let tracker = PersonTrackerView::new("portal", PersonId::from("1"), "Alice");
        let phone = PersonPhoneView::new("portal", PersonId::from("1"), "Alice");

        assert_eq!(presence.is_on(Some(&snap)), None);
        assert_eq!(tracker.is_connected(Some(&snap)), None);
        assert_eq!(phone.value(Some(&snap)), None);
    }

    #[test]
    fn phone_view_projects_mac_and_photo() {
        let snap = snapshot();
        let view = PersonPhoneView::new("portal", PersonId::from("1"), "Alice");

        // Exactly what the provider sent, byte for byte.
        assert_eq!(
            view.value(Some(&snap)).unwrap().as_str(),
            "AA:BB:CC:DD:EE:FF"
        );
        assert!(view.entity_picture(Some(&snap)).is_some());

        let attrs = view.attributes(Some(&snap));
        assert_eq!(attrs["phone_count"], json!(1));
        assert_eq!(attrs["online"], json!(true));
        assert_eq!(attrs["has_photo"], json!(true));
    }

    #[test]
    fn attributes_degrade_to_identity_only() {
        let view = PersonTrackerView::new("portal", PersonId::from("1"), "Alice");
        let attrs = view.attributes(None);

        assert_eq!(attrs["person_id"], json!("1"));
        assert_eq!(attrs["person_name"], json!("Alice"));
        assert!(!attrs.contains_key("phone_mac"));
        assert!(!attrs.contains_key("online"));
    }

    #[test]
    fn tracker_reports_its_source() {
        let view = PersonTrackerView::new("portal", PersonId::from("1"), "Alice");
        assert_eq!(view.source_type(), "router");
        assert_eq!(view.attributes(None)["source"], json!("captive_portal"));
    }
}
