//! The gateway route table
//!
//! [`route_table`] is the single list of REST routes. [`build_router`] mounts
//! it under the configured base path and applies the middleware stack.
//!
//! # Routes
//!
//! | HTTP | Path | Upstream method |
//! |---|---|---|
//! | GET | /getblockchaininfo | getblockchaininfo |
//! | GET | /getnetworkinfo | getnetworkinfo |
//! | GET | /getwalletinfo | getwalletinfo |
//! | GET | /getnewaddress | getnewaddress |
//! | POST | /sendtoaddress | sendtoaddress |
//! | GET | /gettransaction/:txid | gettransaction |
//! | GET | /getrawtransaction/:txid | getrawtransaction |
//! | GET | /getbalance | getbalance |
//! | POST | /decoderawtransaction | decoderawtransaction |
//! | GET | /getblockhash/:height | getblockhash |
//! | GET | /getblock/:blockhash | getblock |
//! | GET | /validateaddress/:address | validateaddress |
//! | GET | /gettransactionsbyaddress/:address | scantxoutset |

use crate::handlers::{self, GatewayState};
use crate::metrics::ServerMetrics;
use crate::middleware::{cors_layer, record_metrics, trace_layer};
use axum::{
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;

/// Base path used when none is configured
pub const DEFAULT_BASE_PATH: &str = "/api/bitcoin";

/// One REST route and the upstream method it forwards to
pub struct RouteEntry {
    /// HTTP verb, for display
    pub verb: &'static str,
    /// Path relative to the base path, in axum syntax
    pub path: &'static str,
    /// Upstream JSON-RPC method
    pub rpc_method: &'static str,
    /// Handler mounted at `path`
    pub handler: MethodRouter<GatewayState>,
}

/// The canonical list of gateway routes
pub fn route_table() -> Vec<RouteEntry> {
    fn entry(
        verb: &'static str,
        path: &'static str,
        rpc_method: &'static str,
        handler: MethodRouter<GatewayState>,
    ) -> RouteEntry {
        RouteEntry {
            verb,
            path,
            rpc_method,
            handler,
        }
    }

    vec![
        entry("GET", "/getblockchaininfo", "getblockchaininfo", get(handlers::get_blockchain_info)),
        entry("GET", "/getnetworkinfo", "getnetworkinfo", get(handlers::get_network_info)),
        entry("GET", "/getwalletinfo", "getwalletinfo", get(handlers::get_wallet_info)),
        entry("GET", "/getnewaddress", "getnewaddress", get(handlers::get_new_address)),
        entry("POST", "/sendtoaddress", "sendtoaddress", post(handlers::send_to_address)),
        entry("GET", "/gettransaction/:txid", "gettransaction", get(handlers::get_transaction)),
        entry("GET", "/getrawtransaction/:txid", "getrawtransaction", get(handlers::get_raw_transaction)),
        entry("GET", "/getbalance", "getbalance", get(handlers::get_balance)),
        entry("POST", "/decoderawtransaction", "decoderawtransaction", post(handlers::decode_raw_transaction)),
        entry("GET", "/getblockhash/:height", "getblockhash", get(handlers::get_block_hash)),
        entry("GET", "/getblock/:blockhash", "getblock", get(handlers::get_block)),
        entry("GET", "/validateaddress/:address", "validateaddress", get(handlers::validate_address)),
        entry(
            "GET",
            "/gettransactionsbyaddress/:address",
            "scantxoutset",
            get(handlers::get_transactions_by_address),
        ),
    ]
}

/// Normalize a configured base path
///
/// Adds a leading `/` and strips trailing ones. An empty result (or `/`)
/// means the routes sit at the root.
pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Options for assembling the router
#[derive(Clone, Default)]
pub struct RouterOptions {
    /// Mount point for all routes
    pub base_path: String,
    /// Apply the permissive CORS layer
    pub cors: bool,
    /// Record per-route metrics
    pub metrics: Option<Arc<ServerMetrics>>,
}

/// Build the gateway router
pub fn build_router(state: GatewayState, options: RouterOptions) -> Router {
    let routes = route_table()
        .into_iter()
        .fold(Router::new(), |router, route| router.route(route.path, route.handler));

    let base_path = normalize_base_path(&options.base_path);
    // axum rejects nesting at "/", so root mounting uses the routes directly
    let mounted = if base_path.is_empty() {
        routes
    } else {
        Router::new().nest(&base_path, routes)
    };
    let mut router = mounted.with_state(state);

    if let Some(metrics) = options.metrics {
        router = router.layer(axum::middleware::from_fn_with_state(metrics, record_metrics));
    }
    router = router.layer(trace_layer());
    if options.cors {
        router = router.layer(cors_layer());
    }

    router
}
