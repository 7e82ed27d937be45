//! nodegate - REST gateway for a Bitcoin-style node's JSON-RPC interface
//!
//! This is the convenience crate that re-exports the nodegate sub-crates and
//! holds the binary's configuration.
//!
//! # Architecture
//!
//! - **nodegate-core**: JSON-RPC 1.0 types, codec, error handling, observability
//! - **nodegate-client**: authenticated upstream client and the `NodeRpc` seam
//! - **nodegate-server**: route table, handlers, middleware, server lifecycle
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nodegate::{GatewayServer, RpcClient, UpstreamConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let upstream = UpstreamConfig::from_host_port("http://127.0.0.1", 18443, "user", "pass");
//!     let server = GatewayServer::builder()
//!         .bind_str("127.0.0.1:3000")?
//!         .node(Arc::new(RpcClient::new(upstream)))
//!         .build()
//!         .await?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;

pub use config::GatewayConfig;

pub use nodegate_client as client;
pub use nodegate_core as core;
pub use nodegate_server as server;

pub use nodegate_client::{ClientBuilder, NodeRpc, RpcClient, UpstreamConfig};
pub use nodegate_core::{Error, Result};
pub use nodegate_server::{GatewayServer, ServerBuilder};
