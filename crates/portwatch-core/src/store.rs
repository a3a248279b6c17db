// ── Snapshot store ──
//
// Single source of truth for the latest decoded snapshot and the
// health of the most recent fetch. Both live behind `watch` channels:
// readers always observe a whole snapshot (old or new, never partial)
// and subscribers wake exactly when it is replaced.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::Snapshot;

/// Outcome of the most recent fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchHealth {
    /// No fetch has completed yet.
    #[default]
    Idle,
    /// The last fetch succeeded.
    Ok,
    /// The last fetch failed. Previously stored data is still served.
    Failed { reason: String },
}

impl FetchHealth {
    /// `true` when the last completed fetch failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Reactive store for one portal host's snapshot and fetch health.
pub struct SnapshotStore {
    snapshot: watch::Sender<Option<Arc<Snapshot>>>,
    health: watch::Sender<FetchHealth>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(None);
        let (health, _) = watch::channel(FetchHealth::Idle);
        Self { snapshot, health }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The latest snapshot, or `None` before the first successful fetch.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.borrow().clone()
    }

    /// Health of the most recent fetch attempt.
    pub fn health(&self) -> FetchHealth {
        self.health.borrow().clone()
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe(&self) -> SnapshotStream {
        SnapshotStream::new(self.snapshot.subscribe())
    }

    /// Subscribe to fetch-health transitions.
    pub fn subscribe_health(&self) -> watch::Receiver<FetchHealth> {
        self.health.subscribe()
    }

    // ── Mutations (coordinator only) ─────────────────────────────────

    /// Replace the stored snapshot wholesale and mark the fetch healthy.
    pub(crate) fn apply(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot
            .send_modify(|current| *current = Some(Arc::clone(&snapshot)));
        self.health.send_modify(|h| *h = FetchHealth::Ok);
        snapshot
    }

    /// Record a fetch failure. The stored snapshot is deliberately left
    /// untouched so views keep serving the last known data.
    pub(crate) fn record_failure(&self, reason: String) {
        self.health
            .send_modify(|h| *h = FetchHealth::Failed { reason });
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── Subscription handle ─────────────────────────────────────────────

/// A subscription to snapshot replacements.
///
/// Provides point-in-time access via `latest()` and change notification
/// via `changed()`, or conversion into a `Stream` for combinators.
pub struct SnapshotStream {
    receiver: watch::Receiver<Option<Arc<Snapshot>>>,
}

impl SnapshotStream {
    pub(crate) fn new(receiver: watch::Receiver<Option<Arc<Snapshot>>>) -> Self {
        Self { receiver }
    }

    /// The latest snapshot at this instant.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next replacement, returning the new snapshot.
    /// Returns `None` if the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Snapshot>> {
        self.receiver.changed().await.ok()?;
        self.receiver.borrow_and_update().clone()
    }

    /// Convert into a `Stream` yielding each stored value in turn.
    pub fn into_stream(self) -> WatchStream<Option<Arc<Snapshot>>> {
        WatchStream::new(self.receiver)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(approved: i64) -> Snapshot {
        Snapshot {
            approval_pending: false,
            pending_count: 0,
            approved_count: approved,
            tracked_count: 0,
            people_count: 0,
            people: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn starts_empty_and_idle() {
        let store = SnapshotStore::new();
        assert!(store.current().is_none());
        assert_eq!(store.health(), FetchHealth::Idle);
    }

    #[test]
    fn apply_replaces_wholesale() {
        let store = SnapshotStore::new();
        store.apply(snapshot(1));
        store.apply(snapshot(2));

        assert_eq!(store.current().unwrap().approved_count, 2);
        assert_eq!(store.health(), FetchHealth::Ok);
    }

    #[test]
    fn failure_retains_previous_snapshot() {
        let store = SnapshotStore::new();
        store.apply(snapshot(5));
        store.record_failure("HTTP 500".into());

        // Data survives; only health flips.
        assert_eq!(store.current().unwrap().approved_count, 5);
        assert!(store.health().is_failed());

        // A later success clears the failure.
        store.apply(snapshot(6));
        assert_eq!(store.health(), FetchHealth::Ok);
    }

    #[tokio::test]
    async fn subscriber_wakes_on_replacement() {
        let store = SnapshotStore::new();
        let mut sub = store.subscribe();
        assert!(sub.latest().is_none());

        store.apply(snapshot(3));
        let snap = sub.changed().await.unwrap();
        assert_eq!(snap.approved_count, 3);
    }

    #[tokio::test]
    async fn failure_does_not_wake_snapshot_subscribers() {
        let store = SnapshotStore::new();
        store.apply(snapshot(1));

        let mut sub = store.subscribe();
        store.record_failure("timeout".into());

        // Only the health channel moved.
        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            sub.changed(),
        )
        .await;
        assert!(pending.is_err(), "snapshot channel should not fire");
        assert!(store.health().is_failed());
    }
}
