//! Mock QuickBooks API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! QuickBooks API for integration and end-to-end testing. Unlike wiremock
//! which mocks at the HTTP level per-test, this server keeps state across
//! requests: it assigns ids, enforces required fields and serves created
//! entities back.
//!
//! # Example
//!
//! ```ignore
//! use quickbooks::mock_server::{Fixtures, MockServer};
//! use quickbooks::{Create, Purchase, QuickBooksClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start_empty().await;
//!     let client = QuickBooksClient::with_token("test-token", server.url(), "1").unwrap();
//!
//!     let created = Purchase::create(&client, &Fixtures::minimal_purchase(10.0)).await.unwrap();
//!     assert_eq!(created.id.as_deref(), Some("1"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, DEFAULT_REALM_ID};
pub use server::MockServer;
pub use state::{MockState, RecordedRequest};
