// ── Runtime coordinator configuration ──
//
// Describes *how* to reach one portal host and how often to poll it.
// Never touches disk -- the CLI builds one of these per configured host
// and hands it in.

use std::time::Duration;

/// Default portal port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default polling period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Default total per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for one portal host's coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Portal hostname or IP (required).
    pub host: String,
    /// Portal port (defaults to 3000).
    pub port: u16,
    /// Fixed polling period. Failures are retried at the next tick,
    /// nothing sooner.
    pub poll_interval: Duration,
    /// Total per-request timeout, covering connect through decode.
    pub timeout: Duration,
}

impl CoordinatorConfig {
    /// Config for `host` with every other setting at its default.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Key scoping this host's view ids (`{host}_{port}`), so multiple
    /// configured portals stay fully isolated.
    pub fn host_key(&self) -> String {
        format!("{}_{}", self.host, self.port)
    }
}
