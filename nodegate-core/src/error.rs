//! Error types for nodegate
//!
//! Two error types live here:
//!
//! - **Error**: application-level errors raised anywhere in the gateway (uses thiserror)
//! - **RpcErrorData**: the wire-format error object a node puts in a response
//!
//! # One failure shape for callers
//!
//! Every failed upstream call, be it a refused connection, a 401, a node-side
//! "Invalid address" or a garbled body, becomes [`Error::Upstream`]. The HTTP
//! layer answers all of them the same way: status 500 with the message text.
//! The other variants cover local problems (bad configuration, socket errors)
//! that happen outside a call.
//!
//! # Examples
//!
//! ```rust
//! use nodegate_core::{Error, RpcErrorData};
//!
//! let data = RpcErrorData::new(-8, "Block height out of range");
//! let error = Error::from_rpc("getblockhash", data);
//! assert_eq!(error.message(), "Block height out of range");
//! assert_eq!(error.method(), Some("getblockhash"));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for nodegate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Application-level error type
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// An upstream call failed
    ///
    /// Raised for transport errors, non-2xx statuses, undecodable bodies and
    /// JSON-RPC error objects alike. `message` is what the gateway relays.
    #[error("RPC error [{method}]: {message}")]
    Upstream {
        /// Method whose call failed
        method: String,
        /// Node-side error code, when the node sent one
        code: Option<i32>,
        /// Message text relayed to the gateway client
        message: String,
    },

    /// Serialization or deserialization error outside an upstream call
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Socket or file I/O error
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Build an upstream failure without a node error code
    pub fn upstream(method: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Upstream {
            method: method.into(),
            code: None,
            message: message.into(),
        }
    }

    /// Build an upstream failure from the error object a node returned
    pub fn from_rpc(method: impl Into<String>, data: RpcErrorData) -> Self {
        Error::Upstream {
            method: method.into(),
            code: Some(data.code),
            message: data.message,
        }
    }

    /// Message text to show a gateway client
    ///
    /// For upstream failures this is the bare message, without the method
    /// prefix used by `Display`.
    pub fn message(&self) -> String {
        match self {
            Error::Upstream { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Method that triggered the failure, for upstream failures
    pub fn method(&self) -> Option<&str> {
        match self {
            Error::Upstream { method, .. } => Some(method),
            _ => None,
        }
    }

    /// Short label for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Upstream { code: Some(_), .. } => "rpc",
            Error::Upstream { code: None, .. } => "transport",
            Error::Serialization(_) => "serialization",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

/// JSON-RPC error object as sent by the node
///
/// Bitcoin-style nodes fill `code` and `message`. Any other member is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorData {
    /// Numeric error code, e.g. -5 for an invalid address or key
    pub code: i32,

    /// Human-readable message
    pub message: String,
}

impl RpcErrorData {
    /// Create an error object with code and message
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
