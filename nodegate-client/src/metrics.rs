//! Client metrics definitions
//!
//! OpenTelemetry instruments for upstream calls. They are no-ops unless a
//! meter provider was installed by `nodegate_core::init_observability`.
//!
//! # Metrics Collected
//!
//! - **requests_total**: upstream calls made, by method and outcome (counter)
//! - **request_duration**: upstream call latency in seconds (histogram)
//! - **errors_total**: failed calls, by failure kind (counter)

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Client metrics for monitoring
pub struct ClientMetrics {
    /// Total number of upstream calls
    pub requests_total: Counter<u64>,
    /// Upstream call duration in seconds
    pub request_duration: Histogram<f64>,
    /// Total number of failed upstream calls
    pub errors_total: Counter<u64>,
}

impl ClientMetrics {
    /// Create a new ClientMetrics instance
    pub fn new(service_name: impl Into<String>) -> Self {
        let name: &'static str = Box::leak(service_name.into().into_boxed_str());
        let meter = global::meter(name);
        Self::new_with_meter(&meter)
    }

    /// Create a new ClientMetrics instance with a custom meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("nodegate.client.requests.total")
                .with_description("Total number of upstream RPC calls")
                .build(),
            request_duration: meter
                .f64_histogram("nodegate.client.request.duration")
                .with_description("Upstream RPC call duration in seconds")
                .build(),
            errors_total: meter
                .u64_counter("nodegate.client.errors.total")
                .with_description("Total number of failed upstream RPC calls")
                .build(),
        }
    }

    /// Record a finished call
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a failed call
    pub fn record_error(&self, kind: &str) {
        self.errors_total
            .add(1, &[KeyValue::new("kind", kind.to_string())]);
    }
}
