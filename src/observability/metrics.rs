//! Metrics collection and exposition.
//!
//! # Metrics
//! - `external_data_requests_total` (counter): requests by status code
//! - `external_data_request_duration_seconds` (histogram): latency distribution
//! - `external_data_rows_returned` (histogram): prediction rows per response
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until an
//!   exporter is installed
//! - The Prometheus exporter is opt-in via `observability.metrics_enabled`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished data request.
pub fn record_request(status: u16, start_time: Instant) {
    metrics::counter!("external_data_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("external_data_request_duration_seconds")
        .record(start_time.elapsed().as_secs_f64());
}

/// Record how many prediction rows a successful response carried.
pub fn record_rows(rows: usize) {
    metrics::histogram!("external_data_rows_returned").record(rows as f64);
}
