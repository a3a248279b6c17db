// ── View registry ──
//
// Bridges the reconciler to view instantiation. Invoked synchronously
// after every successful poll: feeds the snapshot through `reconcile`,
// instantiates views for every newly-eligible identifier, and retains
// them for the life of the coordinator. Views are never removed.

use tracing::debug;

use crate::model::{PersonId, Snapshot};
use crate::reconcile::{MaterializedSet, NewlyEligible, reconcile};
use crate::view::{
    ApprovalView, CountKind, CountView, PersonPhoneView, PersonPresenceView, PersonTrackerView,
};

/// All views created for one configured host.
///
/// The singleton views (counts, approval indicator) exist from
/// construction. Per-person views appear as people become eligible and
/// then persist, reporting unknown once their person stops being listed.
pub struct ViewRegistry {
    host_key: String,
    materialized: MaterializedSet,
    counts: Vec<CountView>,
    approval: ApprovalView,
    presence: Vec<PersonPresenceView>,
    phones: Vec<PersonPhoneView>,
    trackers: Vec<PersonTrackerView>,
}

impl ViewRegistry {
    /// Create a registry with the singleton views in place.
    ///
    /// `host_key` scopes every unique id to one configured host, so two
    /// coordinators pointing at different portals never collide.
    pub fn new(host_key: impl Into<String>) -> Self {
        let host_key = host_key.into();
        let counts = CountKind::ALL
            .iter()
            .map(|kind| CountView::new(&host_key, *kind))
            .collect();
        let approval = ApprovalView::new(&host_key);

        Self {
            host_key,
            materialized: MaterializedSet::new(),
            counts,
            approval,
            presence: Vec::new(),
            phones: Vec::new(),
            trackers: Vec::new(),
        }
    }

    // ── Reconciliation ───────────────────────────────────────────────

    /// Apply a fresh snapshot: diff it against the materialized set and
    /// instantiate views for everyone who just became eligible.
    ///
    /// Safe to call on every update -- an already-materialized identifier
    /// is never instantiated twice. Returns what was created.
    pub fn apply(&mut self, snapshot: &Snapshot) -> NewlyEligible {
        let new = reconcile(snapshot, &mut self.materialized);
        if new.is_empty() {
            return new;
        }

        for id in &new.presence {
            let name = self.display_name(snapshot, id);
            self.presence
                .push(PersonPresenceView::new(&self.host_key, id.clone(), &name));
        }
        for id in &new.phone {
            let name = self.display_name(snapshot, id);
            self.phones
                .push(PersonPhoneView::new(&self.host_key, id.clone(), &name));
        }
        for id in &new.tracker {
            let name = self.display_name(snapshot, id);
            self.trackers
                .push(PersonTrackerView::new(&self.host_key, id.clone(), &name));
        }

        debug!(
            presence = new.presence.len(),
            phone = new.phone.len(),
            tracker = new.tracker.len(),
            "materialized new views"
        );
        new
    }

    fn display_name(&self, snapshot: &Snapshot, id: &PersonId) -> String {
        snapshot
            .person(id)
            .map_or_else(|| "Unknown".to_owned(), |p| p.name.clone())
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn host_key(&self) -> &str {
        &self.host_key
    }

    pub fn counts(&self) -> &[CountView] {
        &self.counts
    }

    pub fn approval(&self) -> &ApprovalView {
        &self.approval
    }

    pub fn presence_views(&self) -> &[PersonPresenceView] {
        &self.presence
    }

    pub fn phone_views(&self) -> &[PersonPhoneView] {
        &self.phones
    }

    pub fn tracker_views(&self) -> &[PersonTrackerView] {
        &self.trackers
    }

    /// Total number of views, singletons included.
    pub fn view_count(&self) -> usize {
        self.counts.len()
            + 1
            + self.presence.len()
            + self.phones.len()
            + self.trackers.len()
    }
}
