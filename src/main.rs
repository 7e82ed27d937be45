//! nodegate gateway binary
//!
//! Loads `.env` if present, reads configuration from flags and environment,
//! then serves the REST routes until Ctrl-C or SIGTERM.
//!
//! # Running
//!
//! ```bash
//! RPC_HOST=http://127.0.0.1 RPC_PORT=18443 RPC_USER=user RPC_PASSWORD=pass nodegate
//! curl http://localhost:3000/api/bitcoin/getblockchaininfo
//! ```

use anyhow::Context;
use clap::Parser;
use nodegate::{ClientBuilder, GatewayConfig, GatewayServer};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = GatewayConfig::parse();

    let telemetry_guard = nodegate_core::init_observability(config.observability())
        .map_err(|e| anyhow::anyhow!("Failed to initialize observability: {}", e))?;

    let telemetry = config.exports_telemetry();

    let mut client = ClientBuilder::new(config.upstream());
    if telemetry {
        client = client.with_metrics().service_name("nodegate");
    }
    let client = client.build().context("Failed to build upstream client")?;

    let mut server = GatewayServer::builder()
        .bind_host(config.host.clone(), config.port)
        .node(Arc::new(client))
        .base_path(config.base_path.clone())
        .cors(!config.no_cors);
    if telemetry {
        server = server.with_metrics().service_name("nodegate");
    }
    let server = server
        .build()
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;

    tracing::info!(upstream = %config.upstream().url(), "Forwarding to node");
    for route in nodegate_server::route_table() {
        tracing::info!(
            verb = route.verb,
            path = %format!("{}{}", server.base_path(), route.path),
            rpc_method = route.rpc_method,
            "Route registered"
        );
    }

    let result = server.run_with_shutdown(shutdown_signal()).await;
    nodegate_core::shutdown_observability(telemetry_guard);
    result.context("Gateway stopped with an error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
