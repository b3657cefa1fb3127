//! Ticket storage trait and types.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ticket::{Severity, Ticket, TicketId, TicketStatus};

/// Error type for ticket operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TicketError {
    /// Severity outside the accepted range.
    #[error("Invalid severity {0}: must be between {min} and {max}", min = Severity::MIN, max = Severity::MAX)]
    InvalidSeverity(i64),

    /// Ticket not found.
    #[error("Ticket not found: {0}")]
    NotFound(TicketId),

    /// Cannot perform operation due to current state.
    #[error("Cannot {operation} ticket {id}: current state is {from}")]
    InvalidTransition {
        id: TicketId,
        from: TicketStatus,
        operation: String,
    },

    /// Agent name is empty or whitespace.
    #[error("Agent name cannot be empty")]
    InvalidAgent,

    /// Catalog price cannot be mapped to a severity.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// Agent is not on the configured roster.
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),
}

impl TicketError {
    /// Short machine-readable name of the error (for metrics labels).
    pub fn kind(&self) -> &'static str {
        match self {
            TicketError::InvalidSeverity(_) => "invalid_severity",
            TicketError::NotFound(_) => "not_found",
            TicketError::InvalidTransition { .. } => "invalid_transition",
            TicketError::InvalidAgent => "invalid_agent",
            TicketError::InvalidPrice(_) => "invalid_price",
            TicketError::UnknownAgent(_) => "unknown_agent",
        }
    }
}

/// Request to create a new ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketRequest {
    /// Product the ticket is raised for.
    pub product_name: String,
    /// Validated severity.
    pub severity: Severity,
    /// Creation timestamp, supplied by the caller.
    pub created_at: DateTime<Utc>,
}

impl CreateTicketRequest {
    pub fn new(
        product_name: impl Into<String>,
        severity: Severity,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            severity,
            created_at,
        }
    }
}

/// Which tickets a query should consider.
///
/// Always chosen by the caller; queries never apply an implicit default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every ticket in the store.
    #[default]
    All,
    /// Pending and Assigned tickets.
    Actionable,
    /// Tickets in exactly this state.
    Only(TicketStatus),
}

impl StatusFilter {
    /// Returns true if a ticket in `status` passes the filter.
    pub fn admits(self, status: TicketStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Actionable => status.is_actionable(),
            StatusFilter::Only(wanted) => status == wanted,
        }
    }

    /// Returns the filter as a string (for query parameters and labels).
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Actionable => "actionable",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    /// Parse a filter from a query parameter value.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "actionable" => Ok(StatusFilter::Actionable),
            other => other.parse::<TicketStatus>().map(StatusFilter::Only),
        }
    }
}

impl From<Option<TicketStatus>> for StatusFilter {
    fn from(status: Option<TicketStatus>) -> Self {
        match status {
            Some(status) => StatusFilter::Only(status),
            None => StatusFilter::All,
        }
    }
}

impl From<TicketStatus> for StatusFilter {
    fn from(status: TicketStatus) -> Self {
        StatusFilter::Only(status)
    }
}

/// Mutation applied by [`TicketStore::update`].
///
/// Runs against a working copy; returning an error discards the copy.
pub type TicketMutator<'a> = &'a mut dyn FnMut(&mut Ticket) -> Result<(), TicketError>;

/// Trait for ticket storage backends.
pub trait TicketStore: Send + Sync {
    /// Create a new Pending ticket with the next id.
    fn create(&self, request: CreateTicketRequest) -> Result<Ticket, TicketError>;

    /// Get a ticket by ID.
    fn get(&self, id: TicketId) -> Result<Option<Ticket>, TicketError>;

    /// Snapshot of every ticket. Order is unspecified.
    fn list_all(&self) -> Result<Vec<Ticket>, TicketError>;

    /// Count tickets matching the filter.
    fn count(&self, filter: StatusFilter) -> Result<usize, TicketError>;

    /// Apply a validated mutation and return the committed ticket.
    fn update(&self, id: TicketId, mutator: TicketMutator<'_>) -> Result<Ticket, TicketError>;

    /// Permanently delete a ticket.
    /// Returns the deleted ticket if it existed; absent ids are a no-op.
    fn delete(&self, id: TicketId) -> Result<Option<Ticket>, TicketError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_all_admits_everything() {
        for status in TicketStatus::ALL {
            assert!(StatusFilter::All.admits(status));
        }
    }

    #[test]
    fn test_filter_actionable_hides_resolved() {
        assert!(StatusFilter::Actionable.admits(TicketStatus::Pending));
        assert!(StatusFilter::Actionable.admits(TicketStatus::Assigned));
        assert!(!StatusFilter::Actionable.admits(TicketStatus::Resolved));
    }

    #[test]
    fn test_filter_only_matches_exact_status() {
        let filter = StatusFilter::Only(TicketStatus::Pending);
        assert!(filter.admits(TicketStatus::Pending));
        assert!(!filter.admits(TicketStatus::Assigned));
        assert!(!filter.admits(TicketStatus::Resolved));
    }

    #[test]
    fn test_filter_from_option() {
        assert_eq!(StatusFilter::from(None), StatusFilter::All);
        assert_eq!(
            StatusFilter::from(Some(TicketStatus::Resolved)),
            StatusFilter::Only(TicketStatus::Resolved)
        );
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(StatusFilter::parse("all").unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse("Actionable").unwrap(),
            StatusFilter::Actionable
        );
        assert_eq!(
            StatusFilter::parse("assigned").unwrap(),
            StatusFilter::Only(TicketStatus::Assigned)
        );
        assert!(StatusFilter::parse("open").is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TicketError::NotFound(TicketId(4)).to_string(),
            "Ticket not found: 4"
        );
        assert_eq!(
            TicketError::InvalidSeverity(9).to_string(),
            "Invalid severity 9: must be between 1 and 5"
        );
        let err = TicketError::InvalidTransition {
            id: TicketId(2),
            from: TicketStatus::Resolved,
            operation: "assign".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot assign ticket 2: current state is resolved"
        );
    }
}
