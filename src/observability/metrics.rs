//! Metrics collection and exposition.
//!
//! # Metrics
//! - `urlshort_requests_total` (counter): requests by outcome and status
//! - `urlshort_resolve_duration_seconds` (histogram): chain resolve latency
//! - `urlshort_chain_rebuilds_total` (counter): rebuilds by trigger and result
//! - `urlshort_store_writes_total` (counter): entries written to the store
//! - `urlshort_chain_layers` (gauge): active layers in the live chain
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Prometheus exporter is opt-in via config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a resolved request.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "urlshort_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("urlshort_resolve_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a chain rebuild attempt.
pub fn record_rebuild(trigger: &'static str, ok: bool) {
    let result = if ok { "ok" } else { "error" };
    metrics::counter!(
        "urlshort_chain_rebuilds_total",
        "trigger" => trigger,
        "result" => result
    )
    .increment(1);
}

/// Record entries written to the store.
pub fn record_store_writes(count: usize) {
    metrics::counter!("urlshort_store_writes_total").increment(count as u64);
}

/// Record the number of layers in the live chain.
pub fn record_chain_layers(count: usize) {
    metrics::gauge!("urlshort_chain_layers").set(count as f64);
}
