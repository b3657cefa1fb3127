use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::triage::PriorityWeights;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Priority function weights
    #[serde(default)]
    pub triage: PriorityWeights,
    #[serde(default)]
    pub agents: AgentsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Support agents that tickets can be assigned to
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentsConfig {
    /// Known agent names. An empty roster accepts any non-blank name.
    #[serde(default = "default_roster")]
    pub roster: Vec<String>,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            roster: default_roster(),
        }
    }
}

fn default_roster() -> Vec<String> {
    ["Arce", "Kath", "Dennis", "Clark"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl AgentsConfig {
    /// Returns true if `agent` may be assigned tickets.
    pub fn allows(&self, agent: &str) -> bool {
        let agent = agent.trim();
        self.roster.is_empty() || self.roster.iter().any(|name| name == agent)
    }
}
