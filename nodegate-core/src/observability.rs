//! Logging and OpenTelemetry bootstrap
//!
//! Local logging is always on: a `tracing` subscriber writes structured JSON
//! lines to stdout, filtered by `RUST_LOG` or the configured level. Export of
//! traces and metrics over OTLP/gRPC is opt-in and only happens when a
//! collector endpoint is configured.
//!
//! # Usage Pattern
//!
//! Initialize once at startup, before building the client and server:
//!
//! ```rust,no_run
//! use nodegate_core::ObservabilityConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ObservabilityConfig::new("nodegate")
//!         .with_endpoint("http://localhost:4317")
//!         .with_log_level("debug");
//!
//!     let guard = nodegate_core::init_observability(config).expect("Failed to init observability");
//!
//!     // ... serve requests ...
//!
//!     nodegate_core::shutdown_observability(guard);
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector endpoint; export stays off when unset
//! - `RUST_LOG`: log filter directives (e.g., "info", "nodegate_server=debug")

use opentelemetry::{global, KeyValue};
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Boxed error returned by the bootstrap functions
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Observability configuration
///
/// # Defaults
///
/// - Service name: "nodegate"
/// - Service version: current crate version
/// - OTLP endpoint: `$OTEL_EXPORTER_OTLP_ENDPOINT`, or none
/// - Traces and metrics: enabled only when an endpoint is known
/// - Logs: enabled
/// - Log level: `$RUST_LOG`, or "info"
///
/// # Examples
///
/// ```rust
/// use nodegate_core::ObservabilityConfig;
///
/// let config = ObservabilityConfig::new("nodegate-regtest")
///     .with_endpoint("http://collector:4317")
///     .with_metrics(false);
///
/// assert!(config.exports_traces());
/// assert!(!config.exports_metrics());
/// ```
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to every span and metric
    pub service_name: String,

    /// Service version attached to every span and metric
    pub service_version: String,

    /// OTLP/gRPC collector endpoint
    ///
    /// `None` keeps all telemetry local, regardless of the enable flags.
    pub otlp_endpoint: Option<String>,

    /// Export spans to the collector
    pub enable_traces: bool,

    /// Export metrics to the collector
    pub enable_metrics: bool,

    /// Emit structured log lines on stdout
    pub enable_logs: bool,

    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let otlp_endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .filter(|endpoint| !endpoint.trim().is_empty());
        let export = otlp_endpoint.is_some();

        Self {
            service_name: "nodegate".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            otlp_endpoint,
            enable_traces: export,
            enable_metrics: export,
            enable_logs: true,
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl ObservabilityConfig {
    /// Create a configuration with a custom service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set the collector endpoint and turn on trace and metric export
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self.enable_traces = true;
        self.enable_metrics = true;
        self
    }

    /// Remove the collector endpoint, keeping telemetry local
    pub fn without_endpoint(mut self) -> Self {
        self.otlp_endpoint = None;
        self
    }

    /// Set the log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    /// Enable or disable trace export
    pub fn with_traces(mut self, enable: bool) -> Self {
        self.enable_traces = enable;
        self
    }

    /// Enable or disable metric export
    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Enable or disable stdout logging
    pub fn with_logs(mut self, enable: bool) -> Self {
        self.enable_logs = enable;
        self
    }

    /// Whether spans will actually leave the process
    pub fn exports_traces(&self) -> bool {
        self.enable_traces && self.otlp_endpoint.is_some()
    }

    /// Whether metrics will actually leave the process
    pub fn exports_metrics(&self) -> bool {
        self.enable_metrics && self.otlp_endpoint.is_some()
    }

    fn resource(&self) -> opentelemetry_sdk::Resource {
        opentelemetry_sdk::Resource::builder_empty()
            .with_attributes(vec![
                KeyValue::new(
                    opentelemetry_semantic_conventions::resource::SERVICE_NAME,
                    self.service_name.clone(),
                ),
                KeyValue::new(
                    opentelemetry_semantic_conventions::resource::SERVICE_VERSION,
                    self.service_version.clone(),
                ),
            ])
            .build()
    }
}

/// Initialize logging and, when configured, OpenTelemetry export
///
/// Call this once at startup. A second call leaves the first subscriber in
/// place and returns an error instead of panicking.
///
/// # What This Does
///
/// 1. **Tracer provider**: batch span exporter to the collector (if exporting traces)
/// 2. **Meter provider**: OTLP metric exporter read every 30 seconds (if exporting metrics)
/// 3. **Tracing subscriber**: env filter, JSON fmt layer, and the OpenTelemetry layer
///
/// Without a meter provider, instruments created through `opentelemetry::global`
/// are no-ops, so metric recording is always safe to call.
///
/// The returned guard must be handed to [`shutdown_observability`] on exit.
pub fn init_observability(config: ObservabilityConfig) -> Result<ObservabilityGuard, BoxError> {
    let mut guard = ObservabilityGuard::default();

    let tracer = if config.exports_traces() {
        let (tracer, provider) = init_tracer(&config)?;
        guard.tracer_provider = Some(provider);
        Some(tracer)
    } else {
        None
    };

    if config.exports_metrics() {
        guard.meter_provider = Some(init_metrics(&config)?);
    }

    init_tracing_subscriber(&config, tracer)?;

    tracing::info!(
        service_name = %config.service_name,
        otlp_endpoint = config.otlp_endpoint.as_deref().unwrap_or("none"),
        traces = config.exports_traces(),
        metrics = config.exports_metrics(),
        logs = config.enable_logs,
        "Observability initialized"
    );

    Ok(guard)
}

/// Handles to the SDK providers installed by [`init_observability`]
///
/// The global registry keeps its own clones for the life of the process and
/// never drops them, so buffered spans and metrics only leave through
/// [`ObservabilityGuard::shutdown`].
#[derive(Debug, Default)]
pub struct ObservabilityGuard {
    tracer_provider: Option<SdkTracerProvider>,
    meter_provider: Option<SdkMeterProvider>,
}

impl ObservabilityGuard {
    /// Whether any exporter is attached
    pub fn is_exporting(&self) -> bool {
        self.tracer_provider.is_some() || self.meter_provider.is_some()
    }

    /// Flush pending spans and metrics, then stop both providers
    ///
    /// Both providers are shut down even if the first one fails.
    pub fn shutdown(self) -> Result<(), BoxError> {
        let traces = self.tracer_provider.map(|provider| provider.shutdown());
        let metrics = self.meter_provider.map(|provider| provider.shutdown());

        if let Some(result) = traces {
            result.map_err(|e| format!("Tracer provider shutdown failed: {}", e))?;
        }
        if let Some(result) = metrics {
            result.map_err(|e| format!("Meter provider shutdown failed: {}", e))?;
        }
        Ok(())
    }
}

fn init_tracer(
    config: &ObservabilityConfig,
) -> Result<(opentelemetry_sdk::trace::Tracer, SdkTracerProvider), BoxError> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::{RandomIdGenerator, Sampler};

    let mut builder = opentelemetry_otlp::SpanExporter::builder().with_tonic();
    if let Some(endpoint) = &config.otlp_endpoint {
        builder = builder.with_endpoint(endpoint.clone());
    }
    let exporter = builder.build()?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(config.resource())
        .with_sampler(Sampler::AlwaysOn)
        .with_id_generator(RandomIdGenerator::default())
        .build();

    // The subscriber layer needs a tracer before the provider goes global
    let tracer = provider.tracer(config.service_name.clone());
    global::set_tracer_provider(provider.clone());

    Ok((tracer, provider))
}

fn init_metrics(config: &ObservabilityConfig) -> Result<SdkMeterProvider, BoxError> {
    use opentelemetry_otlp::WithExportConfig;

    let mut builder = opentelemetry_otlp::MetricExporter::builder().with_tonic();
    if let Some(endpoint) = &config.otlp_endpoint {
        builder = builder.with_endpoint(endpoint.clone());
    }
    let exporter = builder.build()?;

    let reader = opentelemetry_sdk::metrics::PeriodicReader::builder(exporter)
        .with_interval(Duration::from_secs(30))
        .build();

    let provider = SdkMeterProvider::builder()
        .with_reader(reader)
        .with_resource(config.resource())
        .build();

    global::set_meter_provider(provider.clone());
    Ok(provider)
}

fn init_tracing_subscriber(
    config: &ObservabilityConfig,
    tracer: Option<opentelemetry_sdk::trace::Tracer>,
) -> Result<(), BoxError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let fmt_layer = config.enable_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .json()
    });
    let telemetry_layer = tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Flush and stop telemetry export
///
/// Call this on the way out of `main`, after the server has drained. Export
/// failures are logged, not returned, since the process is exiting anyway.
pub fn shutdown_observability(guard: ObservabilityGuard) {
    tracing::info!(exporting = guard.is_exporting(), "Shutting down observability");
    if let Err(e) = guard.shutdown() {
        tracing::warn!(error = %e, "Telemetry was not fully flushed");
    }
}
