//! Triage queue: on-demand ordering of tickets.
//!
//! Every call re-reads the store and recomputes every rank against the
//! supplied `now`. Nothing is cached between calls.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::priority::{compare_ranked, waiting_time};
use super::PriorityWeights;
use crate::metrics::{RANKED_TICKETS, RANK_DURATION, RANK_QUERIES};
use crate::ticket::{StatusFilter, Ticket, TicketError, TicketStore, TicketView};

/// Ranked view over a ticket store.
pub struct TriageQueue {
    store: Arc<dyn TicketStore>,
    weights: PriorityWeights,
}

impl TriageQueue {
    /// Create a queue over `store` ranking with `weights`.
    pub fn new(store: Arc<dyn TicketStore>, weights: PriorityWeights) -> Self {
        Self { store, weights }
    }

    /// Weights in use.
    pub fn weights(&self) -> PriorityWeights {
        self.weights
    }

    /// Tickets admitted by `filter`, most urgent first, ties by ascending id.
    pub fn rank(
        &self,
        now: DateTime<Utc>,
        filter: StatusFilter,
    ) -> Result<Vec<Ticket>, TicketError> {
        Ok(self
            .ranked(now, filter)?
            .into_iter()
            .map(|(_, ticket)| ticket)
            .collect())
    }

    /// Same ordering as [`rank`](Self::rank), projected into read models.
    pub fn rank_views(
        &self,
        now: DateTime<Utc>,
        filter: StatusFilter,
    ) -> Result<Vec<TicketView>, TicketError> {
        Ok(self
            .ranked(now, filter)?
            .into_iter()
            .map(|(priority, ticket)| view(ticket, priority, now))
            .collect())
    }

    fn ranked(
        &self,
        now: DateTime<Utc>,
        filter: StatusFilter,
    ) -> Result<Vec<(f64, Ticket)>, TicketError> {
        let start = Instant::now();

        let mut ranked: Vec<(f64, Ticket)> = self
            .store
            .list_all()?
            .into_iter()
            .filter(|t| filter.admits(t.status))
            .map(|t| (self.weights.priority(&t, now), t))
            .collect();

        ranked.sort_by(|a, b| compare_ranked((a.0, &a.1), (b.0, &b.1)));

        RANK_QUERIES.with_label_values(&[filter.as_str()]).inc();
        RANK_DURATION.observe(start.elapsed().as_secs_f64());
        RANKED_TICKETS.observe(ranked.len() as f64);
        debug!(filter = filter.as_str(), count = ranked.len(), "Ranked tickets");

        Ok(ranked)
    }
}

fn view(ticket: Ticket, priority: f64, now: DateTime<Utc>) -> TicketView {
    TicketView {
        id: ticket.id,
        waiting_minutes: waiting_time(ticket.created_at, now).num_minutes(),
        band: ticket.severity.band(),
        product: ticket.product_name,
        severity: ticket.severity,
        status: ticket.status,
        agent: ticket.agent,
        priority,
    }
}
