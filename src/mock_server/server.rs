//! axum server hosting the mock QuickBooks endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;

type SharedState = Arc<RwLock<MockState>>;

/// A running mock QuickBooks server bound to a random local port.
///
/// Point a `QuickBooksClient` at [`MockServer::url`] to exercise it.
pub struct MockServer {
    addr: SocketAddr,
    url: String,
    task: JoinHandle<()>,
    state: SharedState,
}

impl MockServer {
    /// Start with the default scenario: realm [`super::DEFAULT_REALM_ID`]
    /// and two stored purchases.
    pub async fn start() -> Self {
        let scenario = Fixtures::default_scenario();
        let state = scenario
            .purchases
            .into_iter()
            .fold(MockState::new().with_realm(&scenario.realm_id), |state, p| {
                state.with_purchase(p)
            });
        Self::with_state(state).await
    }

    /// Start with no data, accepting any realm and any token.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start serving the given state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let state = state.shared();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server port");
        let addr = listener.local_addr().expect("mock server address");

        let app = router(state.clone());
        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });

        Self {
            addr,
            url: format!("http://{addr}"),
            task,
            state,
        }
    }

    /// Base URL, usable as the client endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Socket address the server listens on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Handle to the live state, for inspecting or seeding data mid-test.
    pub fn state(&self) -> SharedState {
        Arc::clone(&self.state)
    }

    /// Stop the server and wait for the task to finish.
    pub async fn shutdown(self) {
        self.task.abort();
        let _ = self.task.await;
    }
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/v3/company/:realm_id/purchase",
            post(handlers::create_purchase),
        )
        .route(
            "/v3/company/:realm_id/purchase/:id",
            get(handlers::get_purchase),
        )
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}
