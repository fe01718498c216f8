//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): handled requests by method, status
//! - `router_negotiations_total` (counter): negotiation runs by outcome
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Prometheus exporter installed only when enabled in config

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a handled request.
pub fn record_request(method: &str, status: u16) {
    ::metrics::counter!(
        "router_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record the outcome of a negotiation run.
pub fn record_negotiation(outcome: &'static str) {
    ::metrics::counter!("router_negotiations_total", "outcome" => outcome).increment(1);
}
