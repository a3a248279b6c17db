#![allow(clippy::unwrap_used)]
// Integration tests for `PortalClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use portwatch_api::{Error, PortalClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, PortalClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = PortalClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Status tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_status_success() {
    let (server, client) = setup().await;

    let payload = json!({
        "approval_pending": true,
        "pending_count": 2,
        "approved_count": 7,
        "tracked_count": 3,
        "people_count": 4,
        "people": [
            {
                "id": "1",
                "name": "Alice",
                "online": true,
                "phone_mac": "AA:BB:CC:DD:EE:FF",
                "phone_count": 1
            },
            {
                "id": "2",
                "name": "Bob",
                "online": false
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/ha/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let status = client.status().await.unwrap();

    assert!(status.approval_pending);
    assert_eq!(status.pending_count, 2);
    assert_eq!(status.approved_count, 7);
    assert_eq!(status.people.len(), 2);
    assert_eq!(status.people[0].name.as_deref(), Some("Alice"));
    assert_eq!(
        status.people[0].phone_mac.as_deref(),
        Some("AA:BB:CC:DD:EE:FF")
    );
    assert!(status.people[0].online);
    assert!(status.people[1].phone_mac.is_none());
}

#[tokio::test]
async fn test_status_sparse_payload_defaults() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ha/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let status = client.status().await.unwrap();

    assert!(!status.approval_pending);
    assert_eq!(status.people_count, 0);
    assert!(status.people.is_empty());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_status_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ha/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.status().await;

    match result {
        Err(Error::Status { status }) => assert_eq!(status, 500),
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_status_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ha/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client.status().await;

    match result {
        Err(Error::Deserialization { ref message, .. }) => {
            assert!(
                message.contains("body preview"),
                "expected body preview in message, got: {message}"
            );
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transient() {
    // Port 1 on localhost is essentially guaranteed closed.
    let base_url = Url::parse("http://127.0.0.1:1").unwrap();
    let client = PortalClient::with_client(reqwest::Client::new(), base_url);

    let err = client.status().await.unwrap_err();
    assert!(err.is_transient(), "connect failure should be transient");
}
