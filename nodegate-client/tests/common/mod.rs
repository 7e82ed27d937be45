//! Common test utilities for nodegate integration tests
//!
//! A mock node: an axum server answering POST / with whatever the test's
//! responder returns, while recording every request body and Authorization
//! header it receives.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// One request as the mock node saw it
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub body: Value,
    pub authorization: Option<String>,
}

type Responder = Arc<dyn Fn(&Value) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Responder,
}

/// Mock JSON-RPC node for client testing
pub struct MockNode {
    addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockNode {
    /// Start a node that answers every call with `{"result": <result>, "error": null}`
    pub async fn with_result(result: Value) -> Self {
        Self::with_responder(move |request| (StatusCode::OK, mock_result(request, result.clone()))).await
    }

    /// Start a node that echoes each request's params back as the result
    pub async fn echo() -> Self {
        Self::with_responder(|request| {
            let params = request.get("params").cloned().unwrap_or(Value::Null);
            (StatusCode::OK, mock_result(request, params))
        })
        .await
    }

    /// Start a node that answers every call with a fixed status and raw body
    pub async fn with_raw(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::with_responder(move |_| (status, body.clone())).await
    }

    /// Start a node with a custom responder
    pub async fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&Value) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let state = MockState {
            calls: calls.clone(),
            responder: Arc::new(responder),
        };
        let app = Router::new().route("/", post(handle)).with_state(state);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            calls,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Address the node listens on
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// URL to configure an upstream client with
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// All requests received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The most recent request received
    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("no call recorded")
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(State(state): State<MockState>, headers: HeaderMap, body: String) -> impl IntoResponse {
    let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.calls.lock().unwrap().push(RecordedCall {
        body: parsed.clone(),
        authorization,
    });

    let (status, reply) = (state.responder)(&parsed);
    (status, [(header::CONTENT_TYPE, "application/json")], reply)
}

/// Successful JSON-RPC 1.0 reply echoing the request id
pub fn mock_result(request: &Value, result: Value) -> String {
    json!({
        "result": result,
        "error": null,
        "id": request.get("id").cloned().unwrap_or(Value::Null),
    })
    .to_string()
}

/// Failed JSON-RPC 1.0 reply
pub fn mock_error(code: i32, message: &str) -> String {
    json!({
        "result": null,
        "error": {"code": code, "message": message},
        "id": null,
    })
    .to_string()
}
