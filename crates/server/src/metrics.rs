//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the triage server:
//! - HTTP request metrics (latency, counts, in flight)
//! - Ticket counts by status (collected dynamically)
//! - Core triage metrics re-registered from `triage_core::metrics`

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};
use regex_lite::Regex;
use triage_core::{StatusFilter, TicketStatus};

use crate::state::AppState;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "triage_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("triage_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "triage_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Ticket Metrics
// =============================================================================

/// Tickets by current status (collected dynamically).
pub static TICKETS_BY_STATUS: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("triage_tickets_by_status", "Current ticket count by status"),
        &["status"],
    )
    .unwrap()
});

static NUMERIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\d+(/|$)").unwrap());

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Tickets
    registry
        .register(Box::new(TICKETS_BY_STATUS.clone()))
        .unwrap();

    // Core metrics (store, lifecycle, queue)
    for metric in triage_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> anyhow::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Refresh gauges that mirror current application state.
///
/// Called right before encoding so the scrape reflects the store as it is now.
pub fn collect_dynamic_metrics(state: &AppState) {
    for status in TicketStatus::ALL {
        if let Ok(count) = state.triage().count(StatusFilter::Only(status)) {
            TICKETS_BY_STATUS
                .with_label_values(&[status.as_str()])
                .set(count as i64);
        }
    }
}

/// Collapse ticket ids in a request path so metric labels stay bounded.
pub fn normalize_path(path: &str) -> String {
    NUMERIC_SEGMENT.replace_all(path, "/{id}$1").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_ticket_id() {
        assert_eq!(normalize_path("/api/v1/tickets/42"), "/api/v1/tickets/{id}");
    }

    #[test]
    fn test_normalize_path_nested() {
        assert_eq!(
            normalize_path("/api/v1/tickets/7/assign"),
            "/api/v1/tickets/{id}/assign"
        );
    }

    #[test]
    fn test_normalize_path_keeps_version_segment() {
        assert_eq!(normalize_path("/api/v1/tickets"), "/api/v1/tickets");
    }

    #[test]
    fn test_encode_includes_registered_metrics() {
        HTTP_REQUESTS_IN_FLIGHT.set(0);
        let text = encode_metrics().unwrap();
        assert!(text.contains("triage_http_requests_in_flight"));
    }
}
