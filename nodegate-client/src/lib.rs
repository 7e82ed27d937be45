//! Upstream JSON-RPC 1.0 client for nodegate
//!
//! This crate sends named calls to a Bitcoin-style node over HTTP POST with
//! Basic authentication and relays the node's `result` back.
//!
//! # Core Features
//!
//! - **One call, one POST**: no batching, no retries, no caching
//! - **Uniform failures**: transport errors, bad statuses and node errors all
//!   surface as [`nodegate_core::Error::Upstream`] carrying a message
//! - **Fixed settings**: URL and credentials are captured at construction
//! - **Observability**: a span per call, error logs, optional OpenTelemetry metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nodegate_client::{RpcClient, UpstreamConfig};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = UpstreamConfig::from_host_port("http://127.0.0.1", 8332, "rpcuser", "rpcpass");
//!     let client = RpcClient::new(config);
//!
//!     let hash = client.call("getblockhash", vec![json!(0)]).await?;
//!     println!("Genesis: {}", hash);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod client_builder;
mod config;
mod metrics;

pub use client::{NodeRpc, RpcClient};
pub use client_builder::ClientBuilder;
pub use config::UpstreamConfig;
pub use metrics::ClientMetrics;
