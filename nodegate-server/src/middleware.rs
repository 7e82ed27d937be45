//! HTTP middleware for the gateway router
//!
//! Three layers wrap the routes, outermost first:
//!
//! - **CORS**: permissive, so browser front-ends on any origin can call the gateway
//! - **Tracing**: one `tower-http` span per request, with status and latency events
//! - **Metrics**: per-route counters and latency histogram (only when enabled)
//!
//! Each is optional and applied by [`crate::routes::build_router`].

use crate::metrics::ServerMetrics;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::CorsLayer,
    trace::TraceLayer,
};

/// Permissive CORS: any origin, method and header
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Request span layer
pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

/// Record one request in [`ServerMetrics`]
///
/// Requests that matched no route are labelled `unmatched`.
pub async fn record_metrics(
    State(metrics): State<Arc<ServerMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16();
    tracing::debug!(route = %route, status, duration_secs = duration, "Request served");
    metrics.record_request(&route, status, duration);

    response
}
