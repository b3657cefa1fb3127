use std::sync::Arc;
use triage_core::{AgentsConfig, Config, TriageService};

/// Shared application state
pub struct AppState {
    config: Config,
    triage: Arc<TriageService>,
}

impl AppState {
    pub fn new(config: Config, triage: Arc<TriageService>) -> Self {
        Self { config, triage }
    }

    /// Build state with a fresh in-memory store ranked by the configured weights.
    pub fn from_config(config: Config) -> Self {
        let triage = Arc::new(TriageService::in_memory(config.triage));
        Self::new(config, triage)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn agents(&self) -> &AgentsConfig {
        &self.config.agents
    }

    pub fn triage(&self) -> &TriageService {
        self.triage.as_ref()
    }
}
