//! Test utilities for receh-core
//!
//! Provides a mock relay that serves a fixed report payload, standing in for
//! the `/api/proxy` endpoint in front of the PHP backend.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::sync::oneshot;

#[derive(Clone)]
struct RelayState {
    payload: Arc<String>,
    last_endpoint: Arc<Mutex<Option<String>>>,
}

/// Mock relay server for testing and development
pub struct MockRelayServer {
    addr: SocketAddr,
    last_endpoint: Arc<Mutex<Option<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockRelayServer {
    /// Start the mock relay on an available port, serving `payload` as JSON
    pub async fn start(payload: &str) -> Self {
        let last_endpoint = Arc::new(Mutex::new(None));
        let state = RelayState {
            payload: Arc::new(payload.to_string()),
            last_endpoint: last_endpoint.clone(),
        };

        let app = Router::new()
            .route("/api/proxy", get(handle_proxy))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            last_endpoint,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// URL of the relay endpoint
    pub fn proxy_url(&self) -> String {
        format!("http://{}/api/proxy", self.addr)
    }

    /// URL that answers 404
    pub fn missing_url(&self) -> String {
        format!("http://{}/api/missing", self.addr)
    }

    /// `endpoint` query parameter of the most recent request
    pub fn last_endpoint(&self) -> Option<String> {
        self.last_endpoint.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockRelayServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_proxy(
    State(state): State<RelayState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    *state.last_endpoint.lock().unwrap() = params.get("endpoint").cloned();
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.payload.as_ref().clone(),
    )
}
