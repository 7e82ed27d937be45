//! Helpers for the gateway's end-to-end tests
//!
//! [`MockNode`] stands in for the upstream node: an axum server answering
//! POST / through a responder closure and recording what it was sent.

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

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub body: Value,
    pub authorization: Option<String>,
}

type Responder = Arc<dyn Fn(&Value) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
struct NodeState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Responder,
}

pub struct MockNode {
    addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockNode {
    pub async fn with_result(result: Value) -> Self {
        Self::with_responder(move |request| (StatusCode::OK, mock_result(request, result.clone()))).await
    }

    pub async fn with_raw(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::with_responder(move |_| (status, body.clone())).await
    }

    pub async fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&Value) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new().route("/", post(record_and_reply)).with_state(NodeState {
            calls: calls.clone(),
            responder: Arc::new(responder),
        });

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

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

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

async fn record_and_reply(
    State(state): State<NodeState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
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

pub fn mock_result(request: &Value, result: Value) -> String {
    json!({
        "result": result,
        "error": null,
        "id": request.get("id").cloned().unwrap_or(Value::Null),
    })
    .to_string()
}

pub fn mock_error(code: i32, message: &str) -> String {
    json!({
        "result": null,
        "error": {"code": code, "message": message},
        "id": null,
    })
    .to_string()
}
