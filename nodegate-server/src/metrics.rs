//! Server metrics definitions
//!
//! OpenTelemetry instruments for gateway routes, recorded by the metrics
//! middleware when enabled through `ServerBuilder::with_metrics()`.
//!
//! # Metrics Collected
//!
//! - **requests_total**: HTTP requests served, by route and status (counter)
//! - **request_duration**: time to answer, in seconds (histogram)
//! - **errors_total**: requests answered with a 5xx status, by route (counter)
//!
//! # Examples
//!
//! ```rust
//! use nodegate_server::ServerMetrics;
//!
//! let metrics = ServerMetrics::new("nodegate");
//! metrics.record_request("/api/bitcoin/getbalance", 200, 0.004);
//! ```

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Server metrics for monitoring
///
/// All metrics are prefixed with `nodegate.server.*`.
pub struct ServerMetrics {
    /// Total number of requests served
    pub requests_total: Counter<u64>,
    /// Request duration in seconds
    pub request_duration: Histogram<f64>,
    /// Total number of failed requests
    pub errors_total: Counter<u64>,
}

impl ServerMetrics {
    /// Create a new ServerMetrics instance
    pub fn new(service_name: impl Into<String>) -> Self {
        let name: &'static str = Box::leak(service_name.into().into_boxed_str());
        let meter = global::meter(name);
        Self::new_with_meter(&meter)
    }

    /// Create a new ServerMetrics instance with a custom meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("nodegate.server.requests.total")
                .with_description("Total number of gateway HTTP requests")
                .build(),
            request_duration: meter
                .f64_histogram("nodegate.server.request.duration")
                .with_description("Gateway request duration in seconds")
                .build(),
            errors_total: meter
                .u64_counter("nodegate.server.errors.total")
                .with_description("Total number of gateway requests answered with an error")
                .build(),
        }
    }

    /// Record a served request
    pub fn record_request(&self, route: &str, status: u16, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("route", route.to_string()),
            KeyValue::new("status", i64::from(status)),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);

        if status >= 500 {
            self.errors_total
                .add(1, &[KeyValue::new("route", route.to_string())]);
        }
    }
}
