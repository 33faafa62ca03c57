//! Metrics collection and exposition.
//!
//! # Metrics
//! - `catalog_requests_total` (counter): requests by method, route, status
//! - `catalog_request_duration_seconds` (histogram): latency by route
//! - `catalog_lookups_total` (counter): verify lookups by outcome (hit/miss)
//! - `catalog_firmware_records` (gauge): records in the current snapshot
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Exposition via a standalone Prometheus HTTP listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Record a completed HTTP request.
pub fn record_request(method: &str, status: u16, route: &str, start_time: Instant) {
    metrics::counter!(
        "catalog_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "catalog_request_duration_seconds",
        "route" => route.to_string()
    )
    .record(start_time.elapsed().as_secs_f64());
}

/// Record a verify lookup outcome ("hit" or "miss").
pub fn record_lookup(outcome: &'static str) {
    metrics::counter!("catalog_lookups_total", "outcome" => outcome).increment(1);
}

/// Record the size of the current catalog snapshot.
pub fn record_catalog_size(firmware_records: usize) {
    metrics::gauge!("catalog_firmware_records").set(firmware_records as f64);
}
