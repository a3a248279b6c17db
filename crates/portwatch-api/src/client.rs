// Portal HTTP client
//
// Wraps `reqwest::Client` with portal-specific URL construction and
// status-payload decoding. One client per configured portal host.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::endpoints;
use crate::error::Error;
use crate::status::StatusPayload;
use crate::transport::TransportConfig;

/// Raw HTTP client for one captive-portal server.
///
/// Holds the resolved base URL (`http://{host}:{port}`) and the shared
/// `reqwest::Client`. All methods return decoded payloads; the caller
/// never sees raw bodies except inside deserialization errors.
pub struct PortalClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PortalClient {
    /// Create a new client for `http://{host}:{port}` from a `TransportConfig`.
    pub fn new(host: &str, port: u16, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("http://{host}:{port}"))?;
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client` and base URL.
    ///
    /// Use this in tests, or when several clients should share one
    /// connection pool.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The portal base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the current portal status.
    ///
    /// One GET against [`endpoints::STATUS`]. A non-200 answer maps to
    /// [`Error::Status`]; an undecodable body to [`Error::Deserialization`].
    pub async fn status(&self) -> Result<StatusPayload, Error> {
        self.get(endpoints::STATUS).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Build a full URL for a portal API path.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// Send a GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            // Truncate on a char boundary; bodies are not guaranteed ASCII.
            let cut = body.char_indices().nth(200).map_or(body.len(), |(i, _)| i);
            let preview = &body[..cut];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}
