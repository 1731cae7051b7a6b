//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (requests, latency, lookups, queries)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, path, status
//! - `http_request_duration_seconds` (histogram): latency distribution
//! - `naming_lookups_total` (counter): registry lookups by name, outcome
//! - `sql_queries_total` (counter): statements by outcome
//! - `sql_query_duration_seconds` (histogram): statement latency
//!
//! # Design Decisions
//! - Recording is always safe; without an installed exporter it is a no-op
//! - Paths are the matched route, never the raw URI, to bound cardinality

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record a completed HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a naming registry lookup.
pub fn record_lookup(name: &str, outcome: &'static str) {
    counter!("naming_lookups_total", "name" => name.to_string(), "outcome" => outcome).increment(1);
}

/// Record a SQL statement.
pub fn record_query(outcome: &'static str, start: Instant) {
    counter!("sql_queries_total", "outcome" => outcome).increment(1);
    histogram!("sql_query_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
