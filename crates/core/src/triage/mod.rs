//! Triage engine: priority function, ranked queue and lifecycle control.

mod config;
mod lifecycle;
pub mod priority;
mod queue;
mod service;

pub use config::PriorityWeights;
pub use lifecycle::TicketLifecycle;
pub use priority::{priority, waiting_minutes, waiting_time};
pub use queue::TriageQueue;
pub use service::TriageService;
