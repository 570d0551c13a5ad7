//! Event stream fetching against a local mock node.

use aptwallet_rpc::node::EVENT_PAGE_SIZE;
use aptwallet_rpc::{NodeRpc, RpcConfig, RpcError};
use aptwallet_types::constants::types;
use aptwallet_types::AccountAddress;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn node(server: &MockServer) -> NodeRpc {
    NodeRpc::with_config(RpcConfig {
        url: server.uri(),
        retries: 0,
        retry_delay: Duration::from_millis(1),
        ..Default::default()
    })
    .unwrap()
}

fn owner() -> AccountAddress {
    "0xa11ce".parse().unwrap()
}

fn page(from: u64, len: u64) -> Value {
    let events: Vec<Value> = (from..from + len)
        .map(|seq| {
            json!({
                "version": (1000 + seq).to_string(),
                "sequence_number": seq.to_string(),
                "type": "0x3::token::DepositEvent",
                "data": {"amount": "1"}
            })
        })
        .collect();
    Value::Array(events)
}

// ─── 1. Missing and failing streams ─────────────────────────────────────────

#[tokio::test]
async fn test_missing_stream_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"/events/0x3::token::TokenStore/withdraw_events$"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "resource not found",
            "error_code": "resource_not_found"
        })))
        .mount(&server)
        .await;

    let events = node(&server)
        .get_event_stream(&owner(), types::TOKEN_STORE, types::WITHDRAW_EVENTS, None, None)
        .await
        .unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_server_error_is_not_an_empty_stream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"/withdraw_events$"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = node(&server)
        .get_event_stream(&owner(), types::TOKEN_STORE, types::WITHDRAW_EVENTS, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Api { status: 500, .. }));
}

// ─── 2. Paging ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_all_events_reads_every_page() {
    let server = MockServer::start().await;
    let limit = EVENT_PAGE_SIZE.to_string();
    Mock::given(method("GET"))
        .and(path_regex(r"/deposit_events$"))
        .and(query_param("start", "0"))
        .and(query_param("limit", limit.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, EVENT_PAGE_SIZE)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"/deposit_events$"))
        .and(query_param("start", limit.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(EVENT_PAGE_SIZE, 3)))
        .expect(1)
        .mount(&server)
        .await;

    let events = node(&server)
        .get_all_events(&owner(), types::TOKEN_STORE, types::DEPOSIT_EVENTS)
        .await
        .unwrap();
    assert_eq!(events.len() as u64, EVENT_PAGE_SIZE + 3);
    let last = events.last().unwrap();
    assert_eq!(
        last.sequence_number.as_deref(),
        Some((EVENT_PAGE_SIZE + 2).to_string().as_str())
    );
}

#[tokio::test]
async fn test_all_events_of_missing_stream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"/deposit_events$"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let events = node(&server)
        .get_all_events(&owner(), types::TOKEN_STORE, types::DEPOSIT_EVENTS)
        .await
        .unwrap();
    assert!(events.is_empty());
}
