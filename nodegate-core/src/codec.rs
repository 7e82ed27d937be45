//! Codec for upstream JSON-RPC calls
//!
//! Encoding is plain serde. Decoding is where the gateway's failure rules
//! live: a reply is only a success when the HTTP status is 2xx, the body is a
//! JSON-RPC response and its `error` member is null or absent.
//!
//! # Failure messages
//!
//! | Situation | Message relayed |
//! |---|---|
//! | non-2xx, body carries an error object | the node's `error.message` |
//! | non-2xx, anything else | `Request failed with status code <N>` |
//! | 2xx, body carries an error object | the node's `error.message` |
//! | 2xx, body is not a JSON-RPC response | `Invalid JSON-RPC response: <detail>` |
//!
//! # Examples
//!
//! ```rust
//! use nodegate_core::codec;
//!
//! let err = codec::decode_result("getbalance", 401, b"").unwrap_err();
//! assert_eq!(err.message(), "Request failed with status code 401");
//! ```

use crate::error::{Error, Result};
use crate::types::{RpcRequest, RpcResponse};
use serde_json::Value;

/// Encode an upstream request to JSON
pub fn encode_request(req: &RpcRequest) -> Result<String> {
    serde_json::to_string(req).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode a response body into an [`RpcResponse`]
///
/// Decoding failures are reported as upstream failures of `method`.
pub fn decode_response(method: &str, body: &[u8]) -> Result<RpcResponse> {
    serde_json::from_slice(body)
        .map_err(|e| Error::upstream(method, format!("Invalid JSON-RPC response: {}", e)))
}

/// Turn a raw upstream reply into the call's result
///
/// `status` is the HTTP status code of the reply and `body` its raw bytes.
/// Returns the `result` member verbatim (JSON `null` when absent).
pub fn decode_result(method: &str, status: u16, body: &[u8]) -> Result<Value> {
    if !(200..300).contains(&status) {
        // Nodes usually report RPC errors with a 4xx/5xx status and a JSON body
        let rpc_error = serde_json::from_slice::<RpcResponse>(body)
            .ok()
            .and_then(|resp| resp.error);
        return Err(match rpc_error {
            Some(data) => Error::from_rpc(method, data),
            None => Error::upstream(method, format!("Request failed with status code {}", status)),
        });
    }

    let response = decode_response(method, body)?;
    match response.error {
        Some(data) => Err(Error::from_rpc(method, data)),
        None => Ok(response.into_result()),
    }
}
