//! Gateway configuration
//!
//! Every setting comes from a command-line flag or its environment variable,
//! after an optional `.env` file has been loaded into the environment. The
//! result is built once at startup and never re-read.
//!
//! # Environment Variables
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `RPC_HOST` | required | upstream host, scheme included (`http://127.0.0.1`) |
//! | `RPC_PORT` | required | upstream port |
//! | `RPC_USER` | required | Basic auth username |
//! | `RPC_PASSWORD` | required | Basic auth password |
//! | `HOST` | `0.0.0.0` | gateway listen address or hostname |
//! | `PORT` | `3000` | gateway listen port |
//! | `GATEWAY_BASE_PATH` | `/api/bitcoin` | route mount point |
//! | `GATEWAY_NO_CORS` | off | disable CORS headers (`1`, `yes`, `true`, `on`) |
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | unset | OTLP collector for traces and metrics |
//! | `RUST_LOG` | `info` | log filter |

use clap::Parser;
use nodegate_client::UpstreamConfig;
use nodegate_core::ObservabilityConfig;
use std::fmt;
use clap::builder::BoolishValueParser;

/// Command-line and environment configuration
#[derive(Parser, Clone)]
#[command(
    name = "nodegate",
    version,
    about = "HTTP gateway exposing a Bitcoin-style node's JSON-RPC methods as REST endpoints"
)]
pub struct GatewayConfig {
    /// Upstream node host, including the scheme
    #[arg(long, env = "RPC_HOST")]
    pub rpc_host: String,

    /// Upstream node RPC port
    #[arg(long, env = "RPC_PORT")]
    pub rpc_port: u16,

    /// Upstream RPC username
    #[arg(long, env = "RPC_USER")]
    pub rpc_user: String,

    /// Upstream RPC password
    #[arg(long, env = "RPC_PASSWORD", hide_env_values = true)]
    pub rpc_password: String,

    /// Address or hostname to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Path the routes are mounted under; empty for the root
    #[arg(long, env = "GATEWAY_BASE_PATH", default_value = nodegate_server::DEFAULT_BASE_PATH)]
    pub base_path: String,

    /// Do not send CORS headers
    #[arg(long, env = "GATEWAY_NO_CORS", value_parser = BoolishValueParser::new())]
    pub no_cors: bool,

    /// OTLP/gRPC collector endpoint; enables trace and metric export
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Log filter directive
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl GatewayConfig {
    /// Upstream connection settings
    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig::from_host_port(
            &self.rpc_host,
            self.rpc_port,
            self.rpc_user.clone(),
            self.rpc_password.clone(),
        )
    }

    /// Listen address as `host:port`, for display
    pub fn listen_addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Whether trace and metric export is configured
    pub fn exports_telemetry(&self) -> bool {
        self.otlp_endpoint
            .as_deref()
            .is_some_and(|endpoint| !endpoint.trim().is_empty())
    }

    /// Logging and telemetry settings
    pub fn observability(&self) -> ObservabilityConfig {
        let config = ObservabilityConfig::new("nodegate").with_log_level(self.log_level.clone());
        match &self.otlp_endpoint {
            Some(endpoint) if self.exports_telemetry() => config.with_endpoint(endpoint.clone()),
            _ => config.without_endpoint(),
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("rpc_host", &self.rpc_host)
            .field("rpc_port", &self.rpc_port)
            .field("rpc_user", &self.rpc_user)
            .field("rpc_password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_path", &self.base_path)
            .field("no_cors", &self.no_cors)
            .field("otlp_endpoint", &self.otlp_endpoint)
            .field("log_level", &self.log_level)
            .finish()
    }
}
