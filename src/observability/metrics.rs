//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vdc_poll_cycles_total` (counter): completed polling cycles
//! - `vdc_host_update_failures_total` (counter): failed host list refreshes
//! - `vdc_health_check_failures_total` (counter): failed probes, by host
//! - `vdc_host_healthy` (gauge): 1=healthy, 0=unhealthy, by host

use std::net::SocketAddr;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_cycle() {
    ::metrics::counter!("vdc_poll_cycles_total").increment(1);
}

pub fn record_update_failure() {
    ::metrics::counter!("vdc_host_update_failures_total").increment(1);
}

pub fn record_probe_failure(host: &str) {
    ::metrics::counter!("vdc_health_check_failures_total", "host" => host.to_string()).increment(1);
}

pub fn record_host_health(host: &str, healthy: bool) {
    let value = if healthy { 1.0 } else { 0.0 };
    ::metrics::gauge!("vdc_host_healthy", "host" => host.to_string()).set(value);
}
