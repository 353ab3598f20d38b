//! A stand-in daemon for tests: an axum server on an ephemeral port that
//! answers `/getinfo` and `/json_rpc` from canned fixtures.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Default)]
struct MockState {
    getinfo: Option<String>,
    rpc: HashMap<String, Value>,
    delay: Option<Duration>,
    requests: Mutex<Vec<Value>>,
}

#[derive(Default)]
pub struct MockDaemonBuilder {
    state: MockState,
}

impl MockDaemonBuilder {
    pub fn getinfo(mut self, body: Value) -> Self {
        self.state.getinfo = Some(body.to_string());
        self
    }

    pub fn getinfo_raw(mut self, body: &str) -> Self {
        self.state.getinfo = Some(body.to_string());
        self
    }

    /// Answer `method` with a well-formed response carrying `result`.
    pub fn rpc_result(self, method: &str, result: Value) -> Self {
        self.rpc_response(method, json!({
            "jsonrpc": "2.0",
            "id": "explorer",
            "result": result
        }))
    }

    /// Answer `method` with `body` verbatim.
    pub fn rpc_response(mut self, method: &str, body: Value) -> Self {
        self.state.rpc.insert(method.to_string(), body);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.state.delay = Some(delay);
        self
    }

    pub async fn spawn(self) -> MockDaemon {
        let state = Arc::new(self.state);
        let app = Router::new()
            .route("/getinfo", get(getinfo))
            .route("/json_rpc", post(json_rpc))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockDaemon {
            url: format!("http://{}", addr),
            state,
        }
    }
}

pub struct MockDaemon {
    pub url: String,
    state: Arc<MockState>,
}

impl MockDaemon {
    pub fn builder() -> MockDaemonBuilder {
        MockDaemonBuilder::default()
    }

    /// JSON-RPC bodies received so far, in arrival order.
    pub fn rpc_requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn getinfo(State(state): State<Arc<MockState>>) -> Response {
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    match &state.getinfo {
        Some(body) => ([(header::CONTENT_TYPE, "application/json")], body.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn json_rpc(State(state): State<Arc<MockState>>, Json(request): Json<Value>) -> Json<Value> {
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    state.requests.lock().unwrap().push(request.clone());

    let method = request["method"].as_str().unwrap_or_default();
    let body = state.rpc.get(method).cloned().unwrap_or_else(|| json!({
        "jsonrpc": "2.0",
        "id": request["id"],
        "error": {"code": -32601, "message": "Method not found"}
    }));

    Json(body)
}

/// An endpoint nothing listens on.
pub async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
