//! Triage service: the entry points used by storefront and tickets UIs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::lifecycle::rejected;
use super::{PriorityWeights, TicketLifecycle, TriageQueue};
use crate::catalog::severity_for_price;
use crate::config::AgentsConfig;
use crate::metrics::TICKETS_CREATED;
use crate::ticket::{
    CreateTicketRequest, InMemoryTicketStore, Severity, StatusFilter, Ticket, TicketError,
    TicketId, TicketStore, TicketView,
};

/// Facade wiring the store, queue and lifecycle controller together.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct TriageService {
    store: Arc<dyn TicketStore>,
    queue: TriageQueue,
    lifecycle: TicketLifecycle,
}

impl TriageService {
    /// Create a service over an existing store.
    pub fn new(store: Arc<dyn TicketStore>, weights: PriorityWeights) -> Self {
        Self {
            queue: TriageQueue::new(Arc::clone(&store), weights),
            lifecycle: TicketLifecycle::new(Arc::clone(&store)),
            store,
        }
    }

    /// Create a service over a fresh in-memory store.
    pub fn in_memory(weights: PriorityWeights) -> Self {
        Self::new(Arc::new(InMemoryTicketStore::new()), weights)
    }

    /// Weights used for ranking.
    pub fn weights(&self) -> PriorityWeights {
        self.queue.weights()
    }

    /// Raise a ticket. Out-of-range severities are rejected.
    pub fn create_ticket(
        &self,
        product_name: &str,
        severity: i64,
        created_at: DateTime<Utc>,
    ) -> Result<TicketId, TicketError> {
        self.open_ticket(product_name, severity, created_at)
            .map(|ticket| ticket.id)
    }

    /// Same as [`create_ticket`](Self::create_ticket), returning the stored ticket.
    pub fn open_ticket(
        &self,
        product_name: &str,
        severity: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Ticket, TicketError> {
        let severity = Severity::new(severity).map_err(|e| rejected("create", e))?;
        self.insert(product_name, severity, created_at)
    }

    /// Raise a ticket whose severity is derived from the product price.
    pub fn create_ticket_for_price(
        &self,
        product_name: &str,
        price: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Ticket, TicketError> {
        let severity = severity_for_price(price).map_err(|e| rejected("create", e))?;
        self.insert(product_name, severity, created_at)
    }

    fn insert(
        &self,
        product_name: &str,
        severity: Severity,
        created_at: DateTime<Utc>,
    ) -> Result<Ticket, TicketError> {
        let ticket = self
            .store
            .create(CreateTicketRequest::new(product_name, severity, created_at))?;
        TICKETS_CREATED.inc();
        info!(
            ticket_id = %ticket.id,
            product = %ticket.product_name,
            severity = %ticket.severity,
            "Ticket created"
        );
        Ok(ticket)
    }

    /// Look up a single ticket.
    pub fn get(&self, id: TicketId) -> Result<Option<Ticket>, TicketError> {
        self.store.get(id)
    }

    /// Number of tickets admitted by `filter`.
    pub fn count(&self, filter: impl Into<StatusFilter>) -> Result<usize, TicketError> {
        self.store.count(filter.into())
    }

    /// Tickets ranked at `now`, most urgent first.
    pub fn list_ranked(
        &self,
        now: DateTime<Utc>,
        filter: impl Into<StatusFilter>,
    ) -> Result<Vec<TicketView>, TicketError> {
        self.queue.rank_views(now, filter.into())
    }

    /// Full tickets in ranked order.
    pub fn rank(
        &self,
        now: DateTime<Utc>,
        filter: impl Into<StatusFilter>,
    ) -> Result<Vec<Ticket>, TicketError> {
        self.queue.rank(now, filter.into())
    }

    /// Assign (or re-assign) an agent.
    pub fn assign(&self, id: TicketId, agent: &str) -> Result<Ticket, TicketError> {
        self.lifecycle.assign(id, agent)
    }

    /// Assign an agent that must be on the roster.
    pub fn assign_from_roster(
        &self,
        id: TicketId,
        agent: &str,
        agents: &AgentsConfig,
    ) -> Result<Ticket, TicketError> {
        self.lifecycle.assign_from_roster(id, agent, agents)
    }

    /// Resolve a ticket. Already resolved tickets are left as they are.
    pub fn resolve(&self, id: TicketId) -> Result<Ticket, TicketError> {
        self.lifecycle.resolve(id)
    }

    /// Delete a ticket in any state. Unknown ids are ignored.
    pub fn delete(&self, id: TicketId) -> Result<(), TicketError> {
        self.lifecycle.delete(id).map(|_| ())
    }
}

impl Default for TriageService {
    fn default() -> Self {
        Self::in_memory(PriorityWeights::default())
    }
}
