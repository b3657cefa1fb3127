//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Ticket creation and deletion
//! - Lifecycle transitions and rejected operations
//! - Triage queue queries

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Ticket Metrics
// =============================================================================

/// Tickets created total.
pub static TICKETS_CREATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("triage_tickets_created_total", "Total tickets created").unwrap()
});

/// Tickets deleted total (only deletions that removed something).
pub static TICKETS_DELETED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("triage_tickets_deleted_total", "Total tickets deleted").unwrap()
});

/// Lifecycle transitions.
pub static TICKET_TRANSITIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "triage_ticket_transitions_total",
            "Ticket lifecycle transitions",
        ),
        &["from_state", "to_state"],
    )
    .unwrap()
});

/// Operations rejected by validation.
pub static OPERATIONS_REJECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "triage_operations_rejected_total",
            "Ticket operations rejected",
        ),
        &["operation", "reason"], // reason: TicketError::kind()
    )
    .unwrap()
});

// =============================================================================
// Queue Metrics
// =============================================================================

/// Ranking queries by filter.
pub static RANK_QUERIES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("triage_rank_queries_total", "Total triage queue queries"),
        &["filter"], // "all", "actionable", "pending", "assigned", "resolved"
    )
    .unwrap()
});

/// Time spent building a ranked view.
pub static RANK_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "triage_rank_duration_seconds",
            "Duration of triage queue ranking",
        )
        .buckets(vec![0.00001, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]),
    )
    .unwrap()
});

/// Tickets returned per ranking query.
pub static RANKED_TICKETS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "triage_ranked_tickets",
            "Number of tickets returned per ranking query",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0]),
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(TICKETS_CREATED.clone()),
        Box::new(TICKETS_DELETED.clone()),
        Box::new(TICKET_TRANSITIONS.clone()),
        Box::new(OPERATIONS_REJECTED.clone()),
        Box::new(RANK_QUERIES.clone()),
        Box::new(RANK_DURATION.clone()),
        Box::new(RANKED_TICKETS.clone()),
    ]
}
