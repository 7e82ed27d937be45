//! End-to-end: HTTP client -> gateway -> upstream client -> mock node

mod common;

use axum::http::StatusCode;
use clap::Parser;
use common::{mock_error, mock_result, MockNode};
use nodegate::{GatewayConfig, GatewayServer, RpcClient, UpstreamConfig};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;

struct RunningGateway {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<nodegate::Result<()>>,
}

impl RunningGateway {
    async fn start(upstream: UpstreamConfig) -> Self {
        let server = GatewayServer::builder()
            .bind_str("127.0.0.1:0")
            .unwrap()
            .node(Arc::new(RpcClient::new(upstream)))
            .build()
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.run_with_shutdown(async {
            let _ = shutdown_rx.await;
        }));

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}/api/bitcoin{}", self.addr, path)
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

async fn get_json(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_blockchain_info_round_trip() {
    let info = json!({"chain": "regtest", "blocks": 101, "headers": 101});
    let node = MockNode::with_result(info.clone()).await;
    let gateway = RunningGateway::start(UpstreamConfig::new(node.url(), "rpcuser", "rpcpass")).await;

    let (status, body) = get_json(&gateway.url("/getblockchaininfo")).await;
    assert_eq!(status, 200);
    assert_eq!(body, info);

    let call = node.last_call();
    assert_eq!(call.body["method"], "getblockchaininfo");
    assert_eq!(call.body["id"], "getblockchaininfo");
    assert_eq!(call.body["jsonrpc"], "1.0");
    assert_eq!(call.authorization.as_deref(), Some("Basic cnBjdXNlcjpycGNwYXNz"));

    gateway.stop().await;
}

#[tokio::test]
async fn test_node_error_relayed_as_500() {
    let node = MockNode::with_raw(
        StatusCode::INTERNAL_SERVER_ERROR,
        mock_error(-8, "Block height out of range"),
    )
    .await;
    let gateway = RunningGateway::start(UpstreamConfig::new(node.url(), "u", "p")).await;

    let (status, body) = get_json(&gateway.url("/getblockhash/99999999")).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({"error": "Block height out of range"}));
    assert_eq!(node.last_call().body["params"], json!([99999999]));

    gateway.stop().await;
}

#[tokio::test]
async fn test_bad_credentials_relayed_as_500() {
    let node = MockNode::with_raw(StatusCode::UNAUTHORIZED, "").await;
    let gateway = RunningGateway::start(UpstreamConfig::new(node.url(), "u", "wrong")).await;

    let (status, body) = get_json(&gateway.url("/getwalletinfo")).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({"error": "Request failed with status code 401"}));

    gateway.stop().await;
}

#[tokio::test]
async fn test_sendtoaddress_round_trip() {
    let node = MockNode::with_responder(|request| {
        (StatusCode::OK, mock_result(request, json!("f00dfeed")))
    })
    .await;
    let gateway = RunningGateway::start(UpstreamConfig::new(node.url(), "u", "p")).await;

    let response = reqwest::Client::new()
        .post(gateway.url("/sendtoaddress"))
        .json(&json!({"address": "bcrt1qdest", "amount": 0.25}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"txid": "f00dfeed"}));
    assert_eq!(node.last_call().body["params"], json!(["bcrt1qdest", 0.25]));

    gateway.stop().await;
}

#[tokio::test]
async fn test_upstream_read_once_from_environment() {
    let node = MockNode::with_result(json!(5.0)).await;
    let other = MockNode::with_result(json!(0.0)).await;

    std::env::set_var("RPC_HOST", "http://127.0.0.1");
    std::env::set_var("RPC_PORT", node.addr().port().to_string());
    std::env::set_var("RPC_USER", "envuser");
    std::env::set_var("RPC_PASSWORD", "envpass");
    let config = GatewayConfig::try_parse_from(["nodegate"]).unwrap();
    let gateway = RunningGateway::start(config.upstream()).await;

    // Point the environment somewhere else once the gateway is running
    std::env::set_var("RPC_PORT", other.addr().port().to_string());
    std::env::set_var("RPC_USER", "changed");
    std::env::set_var("RPC_PASSWORD", "changed");

    let (status, body) = get_json(&gateway.url("/getbalance")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"balance": 5.0}));

    assert_eq!(node.calls().len(), 1);
    assert!(other.calls().is_empty());
    assert_eq!(
        node.last_call().authorization.as_deref(),
        Some("Basic ZW52dXNlcjplbnZwYXNz")
    );

    gateway.stop().await;
}
