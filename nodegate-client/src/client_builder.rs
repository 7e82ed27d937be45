//! Client builder for configuring HTTP and metrics options
//!
//! # Examples
//!
//! ```rust
//! use nodegate_client::{ClientBuilder, UpstreamConfig};
//! use std::time::Duration;
//!
//! # fn example() -> nodegate_core::Result<()> {
//! let client = ClientBuilder::new(UpstreamConfig::new("http://127.0.0.1:18443/", "user", "pass"))
//!     .with_timeout(Duration::from_secs(30))
//!     .with_metrics()
//!     .service_name("nodegate-regtest")
//!     .build()?;
//! assert_eq!(client.config().url(), "http://127.0.0.1:18443/");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::{metrics::ClientMetrics, RpcClient, UpstreamConfig};
use nodegate_core::{Error, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for configuring and creating an [`RpcClient`]
pub struct ClientBuilder {
    config: UpstreamConfig,
    timeout: Option<Duration>,
    enable_metrics: bool,
    service_name: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            config,
            timeout: None,
            enable_metrics: false,
            service_name: None,
        }
    }

    /// Bound each upstream call by `timeout`
    ///
    /// By default calls wait as long as the node takes.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Record OpenTelemetry metrics for every call
    pub fn with_metrics(mut self) -> Self {
        self.enable_metrics = true;
        self
    }

    /// Set the meter name used when metrics are enabled
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<RpcClient> {
        let mut http = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        let metrics = self.enable_metrics.then(|| {
            let name = self
                .service_name
                .unwrap_or_else(|| "nodegate-client".to_string());
            Arc::new(ClientMetrics::new(name))
        });

        tracing::debug!(url = %self.config.url(), metrics = metrics.is_some(), "Upstream client built");

        Ok(RpcClient {
            http,
            config: self.config,
            metrics,
        })
    }
}
