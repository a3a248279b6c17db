// portwatch-api: Async Rust client for the captive-portal status API

pub mod client;
pub mod endpoints;
pub mod error;
pub mod status;
pub mod transport;

pub use client::PortalClient;
pub use error::Error;
pub use status::{PersonRecord, StatusPayload};
pub use transport::TransportConfig;
