//! Core JSON-RPC 1.0 types and codec for nodegate
//!
//! This crate provides the pieces shared by the gateway's upstream client and
//! its HTTP dispatcher:
//!
//! - **Types**: the request/response shapes spoken by a Bitcoin-style node
//! - **Codec**: encoding outgoing calls and turning raw upstream replies into results
//! - **Error handling**: the error taxonomy every layer reports through
//! - **Observability**: tracing subscriber and OpenTelemetry bootstrap
//!
//! # Overview
//!
//! The upstream node speaks JSON-RPC 1.0 over HTTP POST. A call carries the
//! method name (also used as the request id) and a positional parameter list;
//! a reply carries `result`, `error` and `id`. Only `result` is relayed on
//! success. Any failure, whatever its cause, is reported as
//! [`Error::Upstream`] with the message text the caller should see.
//!
//! # Example
//!
//! ```rust
//! use nodegate_core::{codec, RpcRequest};
//! use serde_json::json;
//!
//! let request = RpcRequest::new("getblockhash", vec![json!(700000)]);
//! let body = codec::encode_request(&request).unwrap();
//! assert!(body.contains("\"jsonrpc\":\"1.0\""));
//!
//! let reply = br#"{"result":"00000000000000000002a7c4","error":null,"id":"getblockhash"}"#;
//! let result = codec::decode_result("getblockhash", 200, reply).unwrap();
//! assert_eq!(result, json!("00000000000000000002a7c4"));
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod types;

pub use error::{Error, Result, RpcErrorData};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig, ObservabilityGuard};
pub use types::{Id, RpcRequest, RpcResponse, JSONRPC_VERSION};
