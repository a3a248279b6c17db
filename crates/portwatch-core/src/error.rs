// ── Core error types ──
//
// Consumer-facing errors from portwatch-core. The `From<portwatch_api::Error>`
// impl translates transport-layer failures into the coordinator's
// vocabulary; consumers never handle reqwest errors directly.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Setup errors ─────────────────────────────────────────────────
    /// The gating first fetch failed -- setup cannot complete.
    #[error("Cannot connect to portal at {url}: {reason}")]
    CannotConnect { url: String, reason: String },

    /// The coordinator was asked to connect twice.
    #[error("Coordinator already connected")]
    AlreadyConnected,

    // ── Fetch errors ─────────────────────────────────────────────────
    /// The portal answered, but not with a usable status document.
    #[error("Status fetch failed: {message}")]
    FetchFailed { message: String },

    /// The response body could not be decoded.
    #[error("Undecodable status payload: {message}")]
    InvalidPayload { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<portwatch_api::Error> for CoreError {
    fn from(err: portwatch_api::Error) -> Self {
        match err {
            portwatch_api::Error::Transport(ref e) => CoreError::FetchFailed {
                message: e.to_string(),
            },
            portwatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            portwatch_api::Error::Status { status } => CoreError::FetchFailed {
                message: format!("HTTP {status}"),
            },
            portwatch_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidPayload { message }
            }
        }
    }
}
