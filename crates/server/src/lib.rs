//! HTTP surface for the triage engine.

pub mod api;
pub mod metrics;
pub mod state;
