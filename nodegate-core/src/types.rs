//! JSON-RPC 1.0 types as spoken by a Bitcoin-style node
//!
//! The node accepts a single request object per HTTP POST and answers with a
//! single response object. Unlike JSON-RPC 2.0, both `result` and `error` are
//! always present on the wire; the one that does not apply is `null`.
//!
//! # Request IDs
//!
//! The gateway never has more than one call in flight per HTTP exchange, so
//! correlation is trivial. The method name doubles as the request id, which
//! makes upstream logs readable.

use crate::error::RpcErrorData;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Protocol version sent in every upstream request
pub const JSONRPC_VERSION: &str = "1.0";

/// JSON-RPC request ID
///
/// Requests built by the gateway always carry a string id. Responses are
/// decoded leniently, since some nodes echo numeric or null ids.
///
/// # Examples
///
/// ```rust
/// use nodegate_core::Id;
///
/// let id: Id = "getbalance".into();
/// assert_eq!(id.to_string(), "\"getbalance\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// String identifier, the method name for gateway-issued calls
    String(String),
    /// Numeric identifier, only ever seen in replies
    Number(i64),
    /// Null identifier
    Null,
}

impl Default for Id {
    fn default() -> Self {
        Id::Null
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

/// JSON-RPC 1.0 request sent to the upstream node
///
/// Built fresh for every call and dropped once sent. Parameters are
/// positional: their order must match the upstream method's contract, which
/// the gateway does not check.
///
/// # Examples
///
/// ```rust
/// use nodegate_core::{Id, RpcRequest};
/// use serde_json::json;
///
/// let req = RpcRequest::new("getrawtransaction", vec![json!("ab12"), json!(true)]);
/// assert_eq!(req.jsonrpc, "1.0");
/// assert_eq!(req.id, Id::String("getrawtransaction".into()));
/// assert_eq!(req.params.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol version, always "1.0"
    pub jsonrpc: String,
    /// Correlation id, set to the method name
    pub id: Id,
    /// Name of the upstream method to invoke
    pub method: String,
    /// Positional parameters; serialized as `[]` when empty
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Create a request for `method` with the given positional parameters
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        let method = method.into();
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Id::String(method.clone()),
            method,
            params,
        }
    }
}

/// JSON-RPC 1.0 response received from the upstream node
///
/// All fields default when absent so that partial or unusual replies still
/// decode; the codec decides what counts as a failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Method result; `None` when the node sent `null` or omitted it
    #[serde(default)]
    pub result: Option<Value>,
    /// Error object; `None` when the node sent `null` or omitted it
    #[serde(default)]
    pub error: Option<RpcErrorData>,
    /// Echoed request id
    #[serde(default)]
    pub id: Id,
}

impl RpcResponse {
    /// Take the result, mapping an absent result to JSON `null`
    pub fn into_result(self) -> Value {
        self.result.unwrap_or(Value::Null)
    }
}
