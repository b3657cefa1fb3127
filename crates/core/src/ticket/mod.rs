//! Ticket model and storage.

mod memory_store;
mod store;
mod types;

pub use memory_store::InMemoryTicketStore;
pub use store::{
    CreateTicketRequest, StatusFilter, TicketError, TicketMutator, TicketStore,
};
pub use types::{Severity, SeverityBand, Ticket, TicketId, TicketStatus, TicketView};
