//! Server builder for constructing the gateway
//!
//! The builder provides a fluent API for configuring and creating a
//! [`GatewayServer`]. It allows you to:
//! - Set the bind address
//! - Choose the upstream node
//! - Set the base path the routes are mounted under
//! - Toggle CORS
//! - Enable per-route metrics
//!
//! # Examples
//!
//! ```rust,no_run
//! use nodegate_client::{RpcClient, UpstreamConfig};
//! use nodegate_server::GatewayServer;
//! use std::sync::Arc;
//!
//! # async fn example() -> nodegate_core::Result<()> {
//! let node = RpcClient::new(UpstreamConfig::new("http://127.0.0.1:8332/", "user", "pass"));
//! let server = GatewayServer::builder()
//!     .bind_str("0.0.0.0:3000")?
//!     .node(Arc::new(node))
//!     .base_path("/api/bitcoin")
//!     .with_metrics()
//!     .build()
//!     .await?;
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

use crate::handlers::GatewayState;
use crate::metrics::ServerMetrics;
use crate::routes::{build_router, normalize_base_path, RouterOptions, DEFAULT_BASE_PATH};
use crate::GatewayServer;
use nodegate_client::NodeRpc;
use nodegate_core::{Error, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

enum BindTarget {
    Addr(SocketAddr),
    Host(String, u16),
}

/// Builder for constructing a gateway server
pub struct ServerBuilder {
    addr: Option<BindTarget>,
    node: Option<Arc<dyn NodeRpc>>,
    base_path: String,
    cors: bool,
    enable_metrics: bool,
    service_name: Option<String>,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    /// Create a new server builder
    ///
    /// Defaults: base path `/api/bitcoin`, CORS on, metrics off.
    pub fn new() -> Self {
        Self {
            addr: None,
            node: None,
            base_path: DEFAULT_BASE_PATH.to_string(),
            cors: true,
            enable_metrics: false,
            service_name: None,
        }
    }

    /// Set the bind address for the server
    pub fn bind(mut self, addr: impl Into<SocketAddr>) -> Self {
        self.addr = Some(BindTarget::Addr(addr.into()));
        self
    }

    /// Set the bind address from a host, resolved when the server is built
    ///
    /// `host` may be an IP literal or a hostname such as `localhost`.
    pub fn bind_host(mut self, host: impl Into<String>, port: u16) -> Self {
        self.addr = Some(BindTarget::Host(host.into(), port));
        self
    }

    /// Set the bind address from a string (e.g., "0.0.0.0:3000")
    pub fn bind_str(mut self, addr: &str) -> Result<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address '{}': {}", addr, e)))?;
        self.addr = Some(BindTarget::Addr(addr));
        Ok(self)
    }

    /// Set the upstream node every route forwards to
    pub fn node(mut self, node: Arc<dyn NodeRpc>) -> Self {
        self.node = Some(node);
        self
    }

    /// Mount the routes under `base_path` (empty or "/" for the root)
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Enable or disable the permissive CORS layer
    pub fn cors(mut self, enable: bool) -> Self {
        self.cors = enable;
        self
    }

    /// Record per-route OpenTelemetry metrics
    pub fn with_metrics(mut self) -> Self {
        self.enable_metrics = true;
        self
    }

    /// Set the meter name used when metrics are enabled
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Bind the listener and assemble the router
    pub async fn build(self) -> Result<GatewayServer> {
        let addr = self
            .addr
            .ok_or_else(|| Error::Config("No bind address specified".to_string()))?;
        let node = self
            .node
            .ok_or_else(|| Error::Config("No upstream node specified".to_string()))?;

        let listener = match addr {
            BindTarget::Addr(addr) => TcpListener::bind(addr).await?,
            BindTarget::Host(host, port) => TcpListener::bind((host.as_str(), port)).await?,
        };

        let metrics = self.enable_metrics.then(|| {
            let name = self
                .service_name
                .unwrap_or_else(|| "nodegate-server".to_string());
            Arc::new(ServerMetrics::new(name))
        });

        let base_path = normalize_base_path(&self.base_path);
        let router = build_router(
            GatewayState::new(node),
            RouterOptions {
                base_path: base_path.clone(),
                cors: self.cors,
                metrics,
            },
        );

        tracing::info!(
            addr = %listener.local_addr()?,
            base_path = %base_path,
            cors = self.cors,
            "Server listening"
        );

        Ok(GatewayServer {
            listener,
            router,
            base_path,
        })
    }
}
