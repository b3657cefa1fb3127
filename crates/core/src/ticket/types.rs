//! Core ticket data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TicketError;

// ============================================================================
// Identity
// ============================================================================

/// Unique ticket identifier.
///
/// Allocated by the store in strictly increasing order starting at 1 and never
/// reused, even after the ticket it named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub u64);

impl TicketId {
    /// Returns the raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TicketId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

// ============================================================================
// Severity
// ============================================================================

/// Urgency rating assigned at ticket creation.
///
/// Only values in `Severity::MIN..=Severity::MAX` can be constructed, so any
/// `Severity` reaching the ranking math is already in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Severity(u8);

impl Severity {
    /// Lowest accepted severity.
    pub const MIN: u8 = 1;
    /// Highest accepted severity.
    pub const MAX: u8 = 5;

    /// Validate a raw severity. Out-of-range values are rejected, never clamped.
    pub fn new(value: i64) -> Result<Self, TicketError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(TicketError::InvalidSeverity(value))
        }
    }

    /// Returns the numeric severity.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns the display band for this severity.
    pub fn band(self) -> SeverityBand {
        match self.0 {
            4.. => SeverityBand::High,
            2.. => SeverityBand::Medium,
            _ => SeverityBand::Low,
        }
    }
}

impl TryFrom<i64> for Severity {
    type Error = TicketError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse severity grouping shown next to a ticket. Has no effect on ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    Low,
    Medium,
    High,
}

// ============================================================================
// Status
// ============================================================================

/// Lifecycle state of a ticket.
///
/// ```text
/// Pending -> Assigned -> Resolved
///    |                      ^
///    +----------------------+
/// ```
///
/// Re-assigning an Assigned ticket keeps it Assigned. Resolved is terminal;
/// deletion is not a state, it removes the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Pending,
    Assigned,
    Resolved,
}

impl TicketStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Pending,
        TicketStatus::Assigned,
        TicketStatus::Resolved,
    ];

    /// Returns true if no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, TicketStatus::Resolved)
    }

    /// Returns true if an agent can be (re-)assigned from this state.
    pub fn can_assign(self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if the ticket still needs someone to act on it.
    pub fn is_actionable(self) -> bool {
        matches!(self, TicketStatus::Pending | TicketStatus::Assigned)
    }

    /// Returns the status as a string (for filtering and labels).
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Pending => "pending",
            TicketStatus::Assigned => "assigned",
            TicketStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(TicketStatus::Pending),
            "assigned" => Ok(TicketStatus::Assigned),
            "resolved" => Ok(TicketStatus::Resolved),
            other => Err(format!("unknown ticket status: {}", other)),
        }
    }
}

// ============================================================================
// Ticket
// ============================================================================

/// A triage record for one add-to-cart event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    /// Store-assigned identifier.
    pub id: TicketId,

    /// Product the event was raised for. Not unique.
    pub product_name: String,

    /// Urgency rating, fixed at creation.
    pub severity: Severity,

    /// When the ticket was created.
    pub created_at: DateTime<Utc>,

    /// Current lifecycle state.
    pub status: TicketStatus,

    /// Agent handling the ticket. Kept after resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    /// Last successful mutation.
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Build a fresh Pending ticket.
    pub fn new(
        id: TicketId,
        product_name: impl Into<String>,
        severity: Severity,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_name: product_name.into(),
            severity,
            created_at,
            status: TicketStatus::Pending,
            agent: None,
            updated_at: created_at,
        }
    }
}

/// Read model returned by ranked queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketView {
    pub id: TicketId,
    pub product: String,
    pub severity: Severity,
    /// Whole minutes waited at query time, truncated and never negative.
    pub waiting_minutes: i64,
    pub status: TicketStatus,
    pub agent: Option<String>,
    /// Rank value the ordering was derived from (lower = more urgent).
    pub priority: f64,
    pub band: SeverityBand,
}
