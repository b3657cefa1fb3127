//! Ticket lifecycle controller.
//!
//! Validates state transitions and applies them through
//! [`TicketStore::update`], so a rejected transition never touches the store.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::AgentsConfig;
use crate::metrics::{OPERATIONS_REJECTED, TICKETS_DELETED, TICKET_TRANSITIONS};
use crate::ticket::{Ticket, TicketError, TicketId, TicketStatus, TicketStore};

/// Applies assign / resolve / delete commands to a store.
pub struct TicketLifecycle {
    store: Arc<dyn TicketStore>,
}

impl TicketLifecycle {
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self { store }
    }

    /// Pending or Assigned -> Assigned, replacing any previous agent.
    pub fn assign(&self, id: TicketId, agent: &str) -> Result<Ticket, TicketError> {
        self.assign_checked(id, agent, None)
    }

    /// Like [`assign`](Self::assign), but the agent must be allowed by `agents`.
    ///
    /// The roster is checked after the ticket is found and known to be
    /// assignable, so unknown ids and resolved tickets report as such.
    pub fn assign_from_roster(
        &self,
        id: TicketId,
        agent: &str,
        agents: &AgentsConfig,
    ) -> Result<Ticket, TicketError> {
        self.assign_checked(id, agent, Some(agents))
    }

    fn assign_checked(
        &self,
        id: TicketId,
        agent: &str,
        agents: Option<&AgentsConfig>,
    ) -> Result<Ticket, TicketError> {
        let agent = agent.trim();
        if agent.is_empty() {
            return Err(rejected("assign", TicketError::InvalidAgent));
        }

        let mut from = None;
        let result = self.store.update(id, &mut |ticket| {
            if !ticket.status.can_assign() {
                return Err(TicketError::InvalidTransition {
                    id,
                    from: ticket.status,
                    operation: "assign".to_string(),
                });
            }
            if agents.is_some_and(|agents| !agents.allows(agent)) {
                return Err(TicketError::UnknownAgent(agent.to_string()));
            }
            let unchanged = ticket.status == TicketStatus::Assigned
                && ticket.agent.as_deref() == Some(agent);
            if !unchanged {
                from = Some(ticket.status);
                ticket.status = TicketStatus::Assigned;
                ticket.agent = Some(agent.to_string());
            }
            Ok(())
        });

        let ticket = result.map_err(|e| rejected("assign", e))?;
        match from {
            Some(from) => {
                record_transition(from, TicketStatus::Assigned);
                info!(ticket_id = %id, agent = agent, "Ticket assigned");
            }
            None => debug!(ticket_id = %id, agent = agent, "Ticket already assigned to agent"),
        }
        Ok(ticket)
    }

    /// Pending or Assigned -> Resolved. Resolving a Resolved ticket is a no-op.
    ///
    /// The agent, if any, is kept.
    pub fn resolve(&self, id: TicketId) -> Result<Ticket, TicketError> {
        let mut from = None;
        let result = self.store.update(id, &mut |ticket| {
            if ticket.status != TicketStatus::Resolved {
                from = Some(ticket.status);
                ticket.status = TicketStatus::Resolved;
            }
            Ok(())
        });

        let ticket = result.map_err(|e| rejected("resolve", e))?;
        match from {
            Some(from) => {
                record_transition(from, TicketStatus::Resolved);
                info!(ticket_id = %id, from = %from, "Ticket resolved");
            }
            None => info!(ticket_id = %id, "Ticket already resolved"),
        }
        Ok(ticket)
    }

    /// Remove a ticket in any state. Absent ids are a no-op.
    pub fn delete(&self, id: TicketId) -> Result<Option<Ticket>, TicketError> {
        let removed = self.store.delete(id)?;
        match &removed {
            Some(ticket) => {
                TICKETS_DELETED.inc();
                info!(ticket_id = %id, status = %ticket.status, "Ticket deleted");
            }
            None => info!(ticket_id = %id, "Delete of unknown ticket ignored"),
        }
        Ok(removed)
    }
}

fn record_transition(from: TicketStatus, to: TicketStatus) {
    TICKET_TRANSITIONS
        .with_label_values(&[from.as_str(), to.as_str()])
        .inc();
}

pub(crate) fn rejected(operation: &str, error: TicketError) -> TicketError {
    OPERATIONS_REJECTED
        .with_label_values(&[operation, error.kind()])
        .inc();
    warn!(operation = operation, error = %error, "Ticket operation rejected");
    error
}
