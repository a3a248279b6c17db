// ── Reconciler ──
//
// Monotone set-difference between the people a snapshot reports and the
// identifiers already materialized as views. Computed fresh against the
// "present now" set on every refresh -- never against accumulated
// history -- so it is safe to run on every tick: an identifier is
// emitted at most once per view kind for the life of the process.

use std::collections::HashSet;

use crate::model::{PersonId, Snapshot};

/// The kinds of per-person views the reconciler can materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Binary presence (person home / away).
    Presence,
    /// Phone MAC sensor.
    Phone,
    /// Network device tracker.
    Tracker,
}

impl ViewKind {
    pub const ALL: [Self; 3] = [Self::Presence, Self::Phone, Self::Tracker];

    /// Stable token used in unique ids and entity keys.
    pub fn token(self) -> &'static str {
        match self {
            Self::Presence => "presence",
            Self::Phone => "phone",
            Self::Tracker => "tracker",
        }
    }
}

/// Identifiers already materialized as views, partitioned by view kind.
///
/// Owned by the coordinator, one per configured host, and passed
/// explicitly into [`reconcile`]. Grows monotonically: there is no
/// removal path, even when a person disappears from later snapshots --
/// their views persist and report unknown.
#[derive(Debug, Default)]
pub struct MaterializedSet {
    presence: HashSet<PersonId>,
    phone: HashSet<PersonId>,
    tracker: HashSet<PersonId>,
}

impl MaterializedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if `id` has been materialized for `kind`.
    pub fn contains(&self, kind: ViewKind, id: &PersonId) -> bool {
        self.partition(kind).contains(id)
    }

    /// Number of materialized identifiers for `kind`.
    pub fn len(&self, kind: ViewKind) -> usize {
        self.partition(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        ViewKind::ALL.iter().all(|k| self.partition(*k).is_empty())
    }

    fn partition(&self, kind: ViewKind) -> &HashSet<PersonId> {
        match kind {
            ViewKind::Presence => &self.presence,
            ViewKind::Phone => &self.phone,
            ViewKind::Tracker => &self.tracker,
        }
    }

    fn partition_mut(&mut self, kind: ViewKind) -> &mut HashSet<PersonId> {
        match kind {
            ViewKind::Presence => &mut self.presence,
            ViewKind::Phone => &mut self.phone,
            ViewKind::Tracker => &mut self.tracker,
        }
    }
}

/// Identifiers that first became eligible during one reconciliation,
/// per view kind, in snapshot `people` order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NewlyEligible {
    pub presence: Vec<PersonId>,
    pub phone: Vec<PersonId>,
    pub tracker: Vec<PersonId>,
}

impl NewlyEligible {
    pub fn is_empty(&self) -> bool {
        self.presence.is_empty() && self.phone.is_empty() && self.tracker.is_empty()
    }

    pub fn for_kind(&self, kind: ViewKind) -> &[PersonId] {
        match kind {
            ViewKind::Presence => &self.presence,
            ViewKind::Phone => &self.phone,
            ViewKind::Tracker => &self.tracker,
        }
    }
}

/// Diff a snapshot against the materialized set.
///
/// For each view kind, selects the people that (a) carry an id, (b) meet
/// the kind's eligibility bar -- all three per-person kinds require a
/// detected phone -- and (c) are not yet materialized. Selected ids are
/// marked materialized immediately, so calling this again on the same
/// snapshot yields nothing.
pub fn reconcile(snapshot: &Snapshot, materialized: &mut MaterializedSet) -> NewlyEligible {
    let mut new = NewlyEligible::default();

    for person in &snapshot.people {
        let Some(id) = &person.id else { continue };
        if person.phone_mac.is_none() {
            // A person without a detected phone cannot be tracked.
            continue;
        }

        for kind in ViewKind::ALL {
            if materialized.partition_mut(kind).insert(id.clone()) {
                match kind {
                    ViewKind::Presence => new.presence.push(id.clone()),
                    ViewKind::Phone => new.phone.push(id.clone()),
                    ViewKind::Tracker => new.tracker.push(id.clone()),
                }
            }
        }
    }

    new
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{MacAddress, Person};
    use chrono::Utc;

    fn person(id: Option<&str>, mac: Option<&str>) -> Person {
        Person {
            id: id.map(PersonId::from),
            name: "Test".into(),
            online: true,
            phone_mac: mac.map(MacAddress::new),
            phone_count: i64::from(mac.is_some()),
            photo: None,
        }
    }

    fn snapshot(people: Vec<Person>) -> Snapshot {
        Snapshot {
            approval_pending: false,
            pending_count: 0,
            approved_count: 0,
            tracked_count: 0,
            people_count: i64::try_from(people.len()).unwrap(),
            people,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn emits_all_kinds_for_trackable_person() {
        let snap = snapshot(vec![person(Some("1"), Some("aa:bb"))]);
        let mut set = MaterializedSet::new();

        let new = reconcile(&snap, &mut set);

        for kind in ViewKind::ALL {
            assert_eq!(new.for_kind(kind), &[PersonId::from("1")]);
            assert!(set.contains(kind, &PersonId::from("1")));
        }
    }

    #[test]
    fn idempotent_across_repeated_snapshots() {
        let snap = snapshot(vec![person(Some("1"), Some("aa:bb"))]);
        let mut set = MaterializedSet::new();

        let first = reconcile(&snap, &mut set);
        assert!(!first.is_empty());

        let second = reconcile(&snap, &mut set);
        assert!(second.is_empty(), "second pass must emit nothing");
        assert_eq!(set.len(ViewKind::Presence), 1);
    }

    #[test]
    fn person_without_phone_is_never_eligible() {
        let snap = snapshot(vec![person(Some("1"), None)]);
        let mut set = MaterializedSet::new();

        let new = reconcile(&snap, &mut set);

        assert!(new.is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn person_without_id_is_skipped() {
        let snap = snapshot(vec![person(None, Some("aa:bb"))]);
        let mut set = MaterializedSet::new();

        assert!(reconcile(&snap, &mut set).is_empty());
    }

    #[test]
    fn emission_follows_snapshot_order() {
        let snap = snapshot(vec![
            person(Some("b"), Some("aa:01")),
            person(Some("a"), Some("aa:02")),
            person(Some("c"), Some("aa:03")),
        ]);
        let mut set = MaterializedSet::new();

        let new = reconcile(&snap, &mut set);

        let order: Vec<&str> = new.presence.iter().map(PersonId::as_str).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn disappeared_person_stays_materialized() {
        let mut set = MaterializedSet::new();
        reconcile(&snapshot(vec![person(Some("1"), Some("aa:bb"))]), &mut set);

        // Next snapshot no longer lists person 1.
        let new = reconcile(&snapshot(Vec::new()), &mut set);

        assert!(new.is_empty());
        assert!(set.contains(ViewKind::Tracker, &PersonId::from("1")));
    }

    #[test]
    fn phone_gained_later_triggers_materialization() {
        let mut set = MaterializedSet::new();
        reconcile(&snapshot(vec![person(Some("1"), None)]), &mut set);
        assert!(set.is_empty());

        let new = reconcile(&snapshot(vec![person(Some("1"), Some("aa:bb"))]), &mut set);
        assert_eq!(new.phone, vec![PersonId::from("1")]);
    }

    #[test]
    fn duplicate_id_in_one_snapshot_emits_once() {
        let snap = snapshot(vec![
            person(Some("1"), Some("aa:01")),
            person(Some("1"), Some("aa:02")),
        ]);
        let mut set = MaterializedSet::new();

        let new = reconcile(&snap, &mut set);
        assert_eq!(new.presence.len(), 1);
    }
}
