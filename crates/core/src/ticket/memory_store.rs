//! In-memory ticket store implementation.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, warn};

use super::{
    CreateTicketRequest, StatusFilter, Ticket, TicketError, TicketId, TicketMutator, TicketStore,
};

/// In-memory ticket store.
///
/// A single `RwLock` serialises every mutation, including id allocation, so
/// concurrent writers on the same id resolve last-writer-wins in lock order.
/// Readers copy a snapshot under the shared lock.
///
/// A writer that panics poisons the lock but never leaves the map half
/// written, since `update` only commits a finished working copy. Poisoning is
/// therefore cleared and logged, and the store stays usable.
#[derive(Debug, Default)]
pub struct InMemoryTicketStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    /// Last id handed out. Never decreases.
    last_id: u64,
    tickets: BTreeMap<TicketId, Ticket>,
}

impl InMemoryTicketStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(|poisoned| {
            warn!("Ticket store lock poisoned by a panicking writer, recovering");
            self.inner.clear_poison();
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(|poisoned| {
            warn!("Ticket store lock poisoned by a panicking writer, recovering");
            self.inner.clear_poison();
            poisoned.into_inner()
        })
    }
}

impl TicketStore for InMemoryTicketStore {
    fn create(&self, request: CreateTicketRequest) -> Result<Ticket, TicketError> {
        let mut inner = self.write();

        inner.last_id += 1;
        let id = TicketId(inner.last_id);
        let ticket = Ticket::new(
            id,
            request.product_name,
            request.severity,
            request.created_at,
        );
        inner.tickets.insert(id, ticket.clone());

        debug!(ticket_id = %id, severity = %ticket.severity, "Ticket stored");
        Ok(ticket)
    }

    fn get(&self, id: TicketId) -> Result<Option<Ticket>, TicketError> {
        Ok(self.read().tickets.get(&id).cloned())
    }

    fn list_all(&self) -> Result<Vec<Ticket>, TicketError> {
        Ok(self.read().tickets.values().cloned().collect())
    }

    fn count(&self, filter: StatusFilter) -> Result<usize, TicketError> {
        Ok(self
            .read()
            .tickets
            .values()
            .filter(|t| filter.admits(t.status))
            .count())
    }

    fn update(&self, id: TicketId, mutator: TicketMutator<'_>) -> Result<Ticket, TicketError> {
        let mut inner = self.write();

        let current = inner.tickets.get(&id).ok_or(TicketError::NotFound(id))?;
        let mut working = current.clone();
        mutator(&mut working)?;

        // Identity and creation fields are immutable.
        working.id = current.id;
        working.created_at = current.created_at;
        working.severity = current.severity;

        if working != *current {
            working.updated_at = Utc::now().max(current.updated_at);
            inner.tickets.insert(id, working.clone());
            debug!(ticket_id = %id, status = %working.status, "Ticket updated");
        }

        Ok(working)
    }

    fn delete(&self, id: TicketId) -> Result<Option<Ticket>, TicketError> {
        let removed = self.write().tickets.remove(&id);
        if removed.is_some() {
            debug!(ticket_id = %id, "Ticket deleted");
        }
        Ok(removed)
    }
}
