//! E2E tests using the mock QuickBooks server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use quickbooks::mock_server::{Fixtures, MockServer, MockState, DEFAULT_REALM_ID};
use quickbooks::{Create, Get, Purchase, QuickBooksClient, MINOR_VERSION};

fn client(server: &MockServer, realm: &str) -> QuickBooksClient {
    QuickBooksClient::with_token("test-token", server.url(), realm).unwrap()
}

#[tokio::test]
async fn test_servers_are_isolated() {
    let a = MockServer::start_empty().await;
    let b = MockServer::start_empty().await;
    assert_ne!(a.addr(), b.addr());

    Purchase::create(&client(&a, "1"), &Fixtures::minimal_purchase(1.0))
        .await
        .unwrap();

    assert_eq!(a.state().read().await.purchases.len(), 1);
    assert!(b.state().read().await.purchases.is_empty());

    a.shutdown().await;
    b.shutdown().await;
}

// =============================================================================
// Purchase Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_create_then_read_back() {
    let server = MockServer::start().await;
    let client = client(&server, DEFAULT_REALM_ID);

    let mut purchase = Fixtures::minimal_purchase(42.0);
    purchase.private_note = Some("Team lunch".to_string());

    // Step 1: Create
    let created = Purchase::create(&client, &purchase)
        .await
        .expect("Failed to create purchase");

    let id = created.id.clone().expect("server should assign an id");
    assert_eq!(created.sync_token.as_deref(), Some("0"));
    assert!(created.meta_data.is_some());

    // Step 2: Read it back
    let fetched = Purchase::get(&client, id)
        .await
        .expect("Failed to get purchase");

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.private_note.as_deref(), Some("Team lunch"));
    assert_eq!(fetched.total_amt, Some(42.0));

    server.shutdown().await;
}

#[tokio::test]
async fn test_repeated_create_makes_distinct_purchases() {
    let server = MockServer::start_empty().await;
    let client = client(&server, "1");
    let purchase = Fixtures::minimal_purchase(5.0);

    let first = Purchase::create(&client, &purchase).await.unwrap();
    let second = Purchase::create(&client, &purchase).await.unwrap();

    assert_eq!(first.id.as_deref(), Some("1"));
    assert_eq!(second.id.as_deref(), Some("2"));
    assert_eq!(server.state().read().await.purchases.len(), 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_every_request_pins_minor_version() {
    let server = MockServer::start().await;
    let client = client(&server, DEFAULT_REALM_ID);

    Purchase::create(&client, &Fixtures::minimal_purchase(1.0))
        .await
        .unwrap();
    Purchase::get(&client, "252".to_string()).await.unwrap();

    let state = server.state();
    let state = state.read().await;
    assert_eq!(state.requests.len(), 2);
    assert_eq!(state.requests[0].method, "POST");
    assert_eq!(state.requests[1].path, "/v3/company/123145/purchase/252");
    for request in &state.requests {
        assert_eq!(request.minor_version.as_deref(), Some(MINOR_VERSION));
    }

    server.shutdown().await;
}

// =============================================================================
// Failure Tests
// =============================================================================

#[tokio::test]
async fn test_missing_required_field_is_a_validation_fault() {
    let server = MockServer::start().await;
    let client = client(&server, DEFAULT_REALM_ID);

    let mut purchase = Fixtures::minimal_purchase(1.0);
    purchase.account_ref = None;

    let err = Purchase::create(&client, &purchase).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    let fault = err.fault().unwrap();
    assert_eq!(fault.kind.as_deref(), Some("ValidationFault"));
    assert_eq!(fault.code(), Some("2020"));
    assert_eq!(fault.errors[0].element.as_deref(), Some("AccountRef"));

    // Nothing was stored
    assert_eq!(server.state().read().await.purchases.len(), 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_purchase_not_found() {
    let server = MockServer::start().await;
    let client = client(&server, DEFAULT_REALM_ID);

    let err = Purchase::get(&client, "nope".to_string()).await.unwrap_err();

    assert_eq!(err.fault().and_then(|f| f.code()), Some("610"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_required_token() {
    let state = MockState::new().with_required_token("good-token");
    let server = MockServer::with_state(state).await;

    let bad = QuickBooksClient::with_token("bad-token", server.url(), "1").unwrap();
    let err = Purchase::create(&bad, &Fixtures::minimal_purchase(1.0))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.fault().and_then(|f| f.code()), Some("3200"));

    let good = QuickBooksClient::with_token("good-token", server.url(), "1").unwrap();
    let created = Purchase::create(&good, &Fixtures::minimal_purchase(1.0))
        .await
        .unwrap();
    assert!(created.is_persisted());

    server.shutdown().await;
}
