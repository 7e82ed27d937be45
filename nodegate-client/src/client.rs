//! Upstream JSON-RPC client over HTTP
//!
//! This module provides [`RpcClient`], which turns a method name and a list of
//! positional parameters into one authenticated HTTP POST against the node,
//! and [`NodeRpc`], the seam the HTTP dispatcher depends on.
//!
//! # Call Lifecycle
//!
//! 1. **Encode**: build a JSON-RPC 1.0 request whose id is the method name
//! 2. **Send**: POST it with HTTP Basic auth to the configured URL
//! 3. **Decode**: relay `result` verbatim, or fail with [`Error::Upstream`]
//!
//! No retries, no caching, no batching. Each call is independent, so any
//! number may be in flight at once.
//!
//! # Cloning
//!
//! `RpcClient` is cheap to clone: the underlying `reqwest::Client` shares its
//! connection pool between clones.

use crate::{metrics::ClientMetrics, UpstreamConfig};
use async_trait::async_trait;
use nodegate_core::{codec, Error, Result, RpcRequest};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Anything that can execute a named call against a node
///
/// [`RpcClient`] is the production implementation. The HTTP layer only sees
/// this trait, so tests can substitute a recording stub.
#[async_trait]
pub trait NodeRpc: Send + Sync {
    /// Execute `method` with positional `params` and return its result
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value>;
}

/// JSON-RPC client for a Bitcoin-style node
#[derive(Clone)]
pub struct RpcClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: UpstreamConfig,
    pub(crate) metrics: Option<Arc<ClientMetrics>>,
}

impl RpcClient {
    /// Create a client with default HTTP settings and no metrics
    ///
    /// Use [`crate::ClientBuilder`] for timeouts or metrics.
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            metrics: None,
        }
    }

    /// Connection settings this client was built with
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Execute one upstream call
    ///
    /// Returns the node's `result` member verbatim, JSON `null` included. Any
    /// failure is logged with the method name and returned as
    /// [`Error::Upstream`].
    #[tracing::instrument(skip_all, fields(method = %method))]
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let start = Instant::now();
        let outcome = self.send(method, params).await;
        let duration = start.elapsed().as_secs_f64();

        match &outcome {
            Ok(_) => {
                tracing::debug!(duration_secs = duration, "RPC call succeeded");
                if let Some(ref metrics) = self.metrics {
                    metrics.record_request(method, "success", duration);
                }
            }
            Err(e) => {
                tracing::error!(error = %e.message(), kind = e.kind(), "RPC error [{}]", method);
                if let Some(ref metrics) = self.metrics {
                    metrics.record_request(method, "error", duration);
                    metrics.record_error(e.kind());
                }
            }
        }

        outcome
    }

    async fn send(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let request = RpcRequest::new(method, params);
        let body = codec::encode_request(&request)?;

        let response = self
            .http
            .post(self.config.url())
            .basic_auth(self.config.username(), Some(self.config.password()))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::upstream(method, e.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::upstream(method, e.to_string()))?;

        codec::decode_result(method, status, &bytes)
    }
}

#[async_trait]
impl NodeRpc for RpcClient {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        RpcClient::call(self, method, params).await
    }
}
