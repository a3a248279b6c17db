// ── Coordinator ──
//
// Per-host lifecycle management. One coordinator owns one portal
// host's client, snapshot store, view registry, and polling task.
// Multiple configured hosts run fully isolated coordinators.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use portwatch_api::{PortalClient, TransportConfig};

use crate::config::CoordinatorConfig;
use crate::convert::snapshot_from_payload;
use crate::error::CoreError;
use crate::model::Snapshot;
use crate::registry::ViewRegistry;
use crate::store::{SnapshotStore, SnapshotStream};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<CoordinatorInner>`. [`connect()`](Self::connect)
/// performs the gating first fetch -- if the portal is unreachable the
/// whole setup fails -- then spawns the background poll task. Every
/// later failure is transient: recorded in the store's health, previous
/// data retained, retried at the next tick.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    config: CoordinatorConfig,
    client: PortalClient,
    store: Arc<SnapshotStore>,
    /// View registry, mutated only from `refresh()` (reconcile + create)
    /// and read briefly by consumers. Never held across an await.
    registry: Mutex<ViewRegistry>,
    connected: AtomicBool,
    cancel: CancellationToken,
    /// Child token for the current connection -- cancelled on disconnect,
    /// replaced on reconnect (avoids permanent cancellation).
    cancel_child: AsyncMutex<CancellationToken>,
    task_handles: AsyncMutex<Vec<JoinHandle<()>>>,
}

impl Coordinator {
    /// Create a coordinator for one portal host. Does NOT fetch --
    /// call [`connect()`](Self::connect) to validate connectivity and
    /// start polling.
    pub fn new(config: CoordinatorConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = PortalClient::new(&config.host, config.port, &transport)?;
        let registry = ViewRegistry::new(config.host_key());
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Ok(Self {
            inner: Arc::new(CoordinatorInner {
                config,
                client,
                store: Arc::new(SnapshotStore::new()),
                registry: Mutex::new(registry),
                connected: AtomicBool::new(false),
                cancel,
                cancel_child: AsyncMutex::new(cancel_child),
                task_handles: AsyncMutex::new(Vec::new()),
            }),
        })
    }

    /// Access the coordinator configuration.
    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    /// Access the underlying snapshot store.
    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.inner.store
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe(&self) -> SnapshotStream {
        self.inner.store.subscribe()
    }

    /// Read the view registry under its lock.
    pub fn views<R>(&self, f: impl FnOnce(&ViewRegistry) -> R) -> R {
        // The registry stays usable even if a holder panicked mid-apply:
        // worst case is a snapshot's views materializing one tick late.
        let guard = self
            .inner
            .registry
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&guard)
    }

    // ── Connection lifecycle ─────────────────────────────────────────

    /// Validate connectivity and start polling.
    ///
    /// The first fetch gates setup: if it fails, no poll task is
    /// spawned and the error is returned as [`CoreError::CannotConnect`].
    pub async fn connect(&self) -> Result<(), CoreError> {
        if self.inner.connected.swap(true, Ordering::SeqCst) {
            return Err(CoreError::AlreadyConnected);
        }

        // Fresh child token for this connection (supports reconnect).
        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        if let Err(e) = self.refresh().await {
            self.inner.connected.store(false, Ordering::SeqCst);
            return Err(CoreError::CannotConnect {
                url: self.inner.client.base_url().to_string(),
                reason: e.to_string(),
            });
        }

        let task = poll_task(self.clone(), self.inner.config.poll_interval, child);
        self.inner.task_handles.lock().await.push(tokio::spawn(task));

        info!(host = %self.inner.config.host, "connected to portal");
        Ok(())
    }

    /// Stop polling and join the background task. Stored data and views
    /// remain readable afterwards.
    pub async fn disconnect(&self) {
        // Cancel the child token (not the parent -- allows reconnect).
        self.inner.cancel_child.lock().await.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        self.inner.connected.store(false, Ordering::SeqCst);
        debug!("disconnected");
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Perform one fetch-decode-apply-reconcile cycle.
    ///
    /// On success the store is replaced wholesale and the registry is
    /// reconciled synchronously, so subscribers observing the new
    /// snapshot also see its views. On failure the previous snapshot is
    /// retained and only the fetch health flips.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, CoreError> {
        match self.inner.client.status().await {
            Ok(payload) => {
                let snapshot = snapshot_from_payload(payload);
                let new = {
                    let mut registry = self
                        .inner
                        .registry
                        .lock()
                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                    registry.apply(&snapshot)
                };
                if !new.is_empty() {
                    debug!(
                        new_presence = new.presence.len(),
                        new_phone = new.phone.len(),
                        new_tracker = new.tracker.len(),
                        "snapshot introduced new people"
                    );
                }
                Ok(self.inner.store.apply(snapshot))
            }
            Err(e) => {
                self.inner.store.record_failure(e.to_string());
                Err(e.into())
            }
        }
    }
}

// ── Background poll task ─────────────────────────────────────────────

/// Drive `refresh()` on a fixed period until cancelled.
///
/// The refresh future is awaited inside the select arm, so at most one
/// fetch is ever in flight and a slow fetch delays the next tick rather
/// than overlapping it. Failures are logged and retried at the next
/// scheduled tick -- no backoff, no immediate retry.
async fn poll_task(coordinator: Coordinator, period: std::time::Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = coordinator.refresh().await {
                    warn!(error = %e, "periodic status poll failed");
                }
            }
        }
    }
}
