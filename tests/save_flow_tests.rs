use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use readstash::api::{HttpItemsApi, ItemsApi};
use readstash::app::ReadstashError;
use readstash::domain::ItemStatus;
use readstash::flow::{decide, resolve_item_id, NavDecision};
use readstash::poll::{await_terminal, spawn_status_watch, PollConfig};
use readstash::session::SessionContext;

const READY_DELAY: Duration = Duration::from_millis(1200);

fn fast_poll() -> PollConfig {
    PollConfig {
        interval: Duration::from_millis(10),
        ready_delay: READY_DELAY,
        request_timeout: Duration::from_secs(2),
    }
}

fn item_envelope(status: &str) -> serde_json::Value {
    json!({
        "status": "success",
        "data": {
            "id": "item-1",
            "url": "https://example.com/essay",
            "status": status,
            "title": "An Essay",
            "wordCount": 400,
            "savedAt": "2026-08-20T10:00:00Z",
        },
    })
}

/// The whole journey: create, poll through processing, land on ready, and
/// check the navigation decision at each observed status.
#[tokio::test]
async fn save_polls_to_ready_and_opens_preview_after_delay() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items/create-item"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "id": "item-1", "status": "created" },
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items/items/item-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_envelope("processing")))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items/items/item-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_envelope("ready")))
        .mount(&server)
        .await;

    let api: Arc<HttpItemsApi> =
        Arc::new(HttpItemsApi::new(&server.uri(), None, Duration::from_secs(2)));
    let session = SessionContext::new();

    let created = api.create_item("https://example.com/essay").await.unwrap();
    session.set(
        created.id.clone(),
        Some("https://example.com/essay".to_string()),
        Some(created.status),
    );
    assert_eq!(decide(created.status, READY_DELAY), NavDecision::Stay);

    let mut watch = spawn_status_watch(api, created.id, session.clone(), fast_poll());

    let mut decisions = Vec::new();
    while let Some(snapshot) = watch.recv().await {
        let item = snapshot.outcome.unwrap();
        decisions.push(decide(item.status, READY_DELAY));
        if item.status.is_terminal() {
            break;
        }
    }

    assert_eq!(
        decisions,
        vec![
            NavDecision::Stay,
            NavDecision::Stay,
            NavDecision::Preview { after: READY_DELAY },
        ]
    );
    assert_eq!(session.get().unwrap().status, Some(ItemStatus::Ready));
}

#[tokio::test]
async fn failed_analysis_halts_navigation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/items/item-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_envelope("failed")))
        .mount(&server)
        .await;

    let api = Arc::new(HttpItemsApi::new(&server.uri(), None, Duration::from_secs(2)));
    let watch = spawn_status_watch(
        api,
        "item-1".to_string(),
        SessionContext::new(),
        fast_poll(),
    );

    let item = await_terminal(watch).await.unwrap();
    assert_eq!(decide(item.status, READY_DELAY), NavDecision::Halt);
}

/// Items that were already read skip the completion delay on re-open.
#[tokio::test]
async fn reopening_a_read_item_previews_immediately() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/items/item-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_envelope("read")))
        .mount(&server)
        .await;

    let api = Arc::new(HttpItemsApi::new(&server.uri(), None, Duration::from_secs(2)));
    let item = api.get_item("item-1").await.unwrap();

    assert_eq!(
        decide(item.status, READY_DELAY),
        NavDecision::Preview {
            after: Duration::ZERO
        }
    );
}

/// With no explicit id and an empty session, resolution fails before any
/// request is made.
#[tokio::test]
async fn unresolvable_item_makes_no_requests() {
    let server = MockServer::start().await;
    let session = SessionContext::new();

    let err = resolve_item_id(None, &session).unwrap_err();
    assert!(matches!(err, ReadstashError::UnresolvableItem));
    assert!(server.received_requests().await.unwrap().is_empty());
}

/// An explicit id on one command becomes the default for the next.
#[tokio::test]
async fn explicit_id_is_remembered_for_later_commands() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/items/item-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_envelope("ready")))
        .expect(2)
        .mount(&server)
        .await;

    let api = Arc::new(HttpItemsApi::new(&server.uri(), None, Duration::from_secs(2)));
    let session = SessionContext::new();

    let id = resolve_item_id(Some("item-1"), &session).unwrap();
    api.get_item(&id).await.unwrap();

    let id = resolve_item_id(None, &session).unwrap();
    assert_eq!(id, "item-1");
    api.get_item(&id).await.unwrap();
}
