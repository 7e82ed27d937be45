//! REST-to-JSON-RPC route dispatcher for nodegate
//!
//! This crate serves the gateway's HTTP surface. Each REST route maps onto
//! exactly one JSON-RPC method of the upstream node: the handler extracts and
//! coerces its inputs, makes the call through a [`NodeRpc`] and answers with
//! the result, or with HTTP 500 and `{"error": <message>}`.
//!
//! # Core Features
//!
//! - **Route table**: thirteen routes under a configurable base path
//! - **Light shaping**: integer heights, boolean `verbose`, named result fields
//! - **Middleware**: permissive CORS, request spans, optional metrics
//! - **Graceful shutdown**: stop on any future resolving, e.g. Ctrl-C
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nodegate_client::{RpcClient, UpstreamConfig};
//! use nodegate_server::GatewayServer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let upstream = UpstreamConfig::from_host_port("http://127.0.0.1", 8332, "rpcuser", "rpcpass");
//!
//!     let server = GatewayServer::builder()
//!         .bind_str("127.0.0.1:3000")?
//!         .node(Arc::new(RpcClient::new(upstream)))
//!         .build()
//!         .await?;
//!
//!     // GET http://127.0.0.1:3000/api/bitcoin/getblockchaininfo
//!     server
//!         .run_with_shutdown(async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Testing Without a Node
//!
//! The router only depends on [`NodeRpc`], so it can be driven in-process
//! with a stub node and `tower::ServiceExt::oneshot`, without binding a port.

mod builder;
mod handlers;
mod metrics;
mod middleware;
mod routes;

pub use builder::ServerBuilder;
pub use handlers::{extract_txids, is_verbose, parse_height, ApiError, GatewayState};
pub use metrics::ServerMetrics;
pub use middleware::{cors_layer, record_metrics, trace_layer};
pub use routes::{build_router, normalize_base_path, route_table, RouteEntry, RouterOptions, DEFAULT_BASE_PATH};

pub use nodegate_client::NodeRpc;

use axum::Router;
use nodegate_core::Result;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// A bound, ready-to-serve gateway
///
/// # Lifecycle
///
/// 1. **Build**: `GatewayServer::builder()...build().await` binds the listener
/// 2. **Run**: `run()` or `run_with_shutdown(signal)` serves until stopped
///
/// Each request is served on its own task. The only shared state is the
/// upstream node handle, which is read-only.
pub struct GatewayServer {
    listener: TcpListener,
    router: Router,
    base_path: String,
}

impl GatewayServer {
    /// Create a new server builder
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Normalized base path the routes are mounted under
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Serve until an I/O error occurs
    #[tracing::instrument(skip(self), name = "server.run")]
    pub async fn run(self) -> Result<()> {
        tracing::info!("Starting gateway");
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Serve until `signal` resolves, then drain in-flight requests
    #[tracing::instrument(skip_all, name = "server.run")]
    pub async fn run_with_shutdown<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("Starting gateway");
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;
        tracing::info!("Gateway stopped");
        Ok(())
    }
}
