//! Priority function.
//!
//! Maps a ticket snapshot and the current time to a rank value. Lower values
//! are more urgent, so an ascending sort yields most-urgent-first.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};

use super::PriorityWeights;
use crate::ticket::Ticket;

const MILLIS_PER_MINUTE: f64 = 60_000.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Time a ticket has been waiting at `now`, clamped at zero when the clock
/// reads earlier than the creation timestamp.
pub fn waiting_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - created_at).max(Duration::zero())
}

/// Fractional minutes waited at `now`.
pub fn waiting_minutes(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    waiting_time(created_at, now).num_milliseconds() as f64 / MILLIS_PER_MINUTE
}

/// Rank `ticket` at `now` with the default 0.7 / 0.3 weights.
pub fn priority(ticket: &Ticket, now: DateTime<Utc>) -> f64 {
    PriorityWeights::default().priority(ticket, now)
}

impl PriorityWeights {
    /// Rank `ticket` at `now`. Pure and deterministic.
    pub fn priority(&self, ticket: &Ticket, now: DateTime<Utc>) -> f64 {
        let hours_waiting = waiting_minutes(ticket.created_at, now) / MINUTES_PER_HOUR;
        -(self.severity_weight * f64::from(ticket.severity.value())
            + self.wait_weight * hours_waiting)
    }
}

/// Total order used by the triage queue: rank ascending, then id ascending.
pub fn compare_ranked(a: (f64, &Ticket), b: (f64, &Ticket)) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id))
}
