//! Route handlers
//!
//! Every handler follows the same template: extract inputs from the path,
//! query or body, coerce them, make exactly one upstream call through
//! [`NodeRpc`], and serialize the outcome.
//!
//! # Success bodies
//!
//! Most routes relay the upstream result as-is. A few wrap a scalar result
//! in a named field (`{"address": ..}`, `{"txid": ..}`, `{"balance": ..}`,
//! `{"blockhash": ..}`), and the address scan projects txids out of the
//! unspent list.
//!
//! # Failure bodies
//!
//! Any upstream failure becomes HTTP 500 with `{"error": <message>}`.
//!
//! # Coercion
//!
//! Inputs are not validated. A height that does not start with digits is
//! forwarded as `null`, a missing body field is forwarded as `null`, and the
//! node's rejection is relayed.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nodegate_client::NodeRpc;
use nodegate_core::Error;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct GatewayState {
    /// Upstream node the routes forward to
    pub node: Arc<dyn NodeRpc>,
}

impl GatewayState {
    /// Create state around an upstream node
    pub fn new(node: Arc<dyn NodeRpc>) -> Self {
        Self { node }
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, ApiError> {
        self.node.call(method, params).await.map_err(ApiError::from)
    }
}

/// Error response: HTTP 500 with `{"error": <message>}`
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.message() })),
        )
            .into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiError>;

/// Parse the leading integer of `raw`
///
/// Accepts surrounding whitespace and an optional sign, then reads decimal
/// digits until the first non-digit. Yields JSON `null` when there are no
/// digits or the value does not fit in an `i64`.
pub fn parse_height(raw: &str) -> Value {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return Value::Null;
    }

    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    signed.parse::<i64>().map(Value::from).unwrap_or(Value::Null)
}

/// `true` only for the exact query value `true`
pub fn is_verbose(query: Option<&HashMap<String, String>>) -> bool {
    query
        .and_then(|q| q.get("verbose"))
        .map(|v| v == "true")
        .unwrap_or(false)
}

/// Project `unspents[*].txid` out of a `scantxoutset` result
///
/// Entries without a `txid` contribute `null`. A result that is not an
/// object, or has no `unspents` array, yields an empty list.
pub fn extract_txids(result: &Value) -> Value {
    let txids = result
        .get("unspents")
        .and_then(Value::as_array)
        .map(|unspents| {
            unspents
                .iter()
                .map(|u| u.get("txid").cloned().unwrap_or(Value::Null))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    Value::Array(txids)
}

fn wrap(field: &str, value: Value) -> Json<Value> {
    let mut body = Map::new();
    body.insert(field.to_string(), value);
    Json(Value::Object(body))
}

fn body_field(body: &Option<Json<Value>>, field: &str) -> Value {
    body.as_ref()
        .and_then(|Json(b)| b.get(field))
        .cloned()
        .unwrap_or(Value::Null)
}

pub async fn get_blockchain_info(State(state): State<GatewayState>) -> ApiResult {
    state.call("getblockchaininfo", Vec::new()).await.map(Json)
}

pub async fn get_network_info(State(state): State<GatewayState>) -> ApiResult {
    state.call("getnetworkinfo", Vec::new()).await.map(Json)
}

pub async fn get_wallet_info(State(state): State<GatewayState>) -> ApiResult {
    state.call("getwalletinfo", Vec::new()).await.map(Json)
}

pub async fn get_new_address(State(state): State<GatewayState>) -> ApiResult {
    let address = state.call("getnewaddress", Vec::new()).await?;
    Ok(wrap("address", address))
}

pub async fn send_to_address(
    State(state): State<GatewayState>,
    body: Option<Json<Value>>,
) -> ApiResult {
    let params = vec![body_field(&body, "address"), body_field(&body, "amount")];
    let txid = state.call("sendtoaddress", params).await?;
    Ok(wrap("txid", txid))
}

pub async fn get_transaction(
    State(state): State<GatewayState>,
    Path(txid): Path<String>,
) -> ApiResult {
    state.call("gettransaction", vec![Value::String(txid)]).await.map(Json)
}

pub async fn get_raw_transaction(
    State(state): State<GatewayState>,
    Path(txid): Path<String>,
    query: Option<Query<HashMap<String, String>>>,
) -> ApiResult {
    let verbose = is_verbose(query.as_ref().map(|Query(q)| q));
    state
        .call("getrawtransaction", vec![Value::String(txid), Value::Bool(verbose)])
        .await
        .map(Json)
}

pub async fn get_balance(State(state): State<GatewayState>) -> ApiResult {
    let balance = state.call("getbalance", Vec::new()).await?;
    Ok(wrap("balance", balance))
}

pub async fn decode_raw_transaction(
    State(state): State<GatewayState>,
    body: Option<Json<Value>>,
) -> ApiResult {
    state
        .call("decoderawtransaction", vec![body_field(&body, "hex")])
        .await
        .map(Json)
}

pub async fn get_block_hash(
    State(state): State<GatewayState>,
    Path(height): Path<String>,
) -> ApiResult {
    let blockhash = state.call("getblockhash", vec![parse_height(&height)]).await?;
    Ok(wrap("blockhash", blockhash))
}

pub async fn get_block(
    State(state): State<GatewayState>,
    Path(blockhash): Path<String>,
) -> ApiResult {
    state.call("getblock", vec![Value::String(blockhash)]).await.map(Json)
}

pub async fn validate_address(
    State(state): State<GatewayState>,
    Path(address): Path<String>,
) -> ApiResult {
    state
        .call("validateaddress", vec![Value::String(address)])
        .await
        .map(Json)
}

pub async fn get_transactions_by_address(
    State(state): State<GatewayState>,
    Path(address): Path<String>,
) -> ApiResult {
    let descriptor = json!([{ "desc": format!("addr({})", address) }]);
    let scan = state
        .call("scantxoutset", vec![json!("start"), descriptor])
        .await?;
    Ok(wrap("txids", extract_txids(&scan)))
}
