use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Priority weights are finite, non-negative and not both 0
/// - Agent names are non-blank and unique
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    config
        .triage
        .validate()
        .map_err(|e| ConfigError::ValidationError(format!("triage: {}", e)))?;

    let mut seen = HashSet::new();
    for name in &config.agents.roster {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "agents.roster cannot contain blank names".to_string(),
            ));
        }
        if !seen.insert(name.trim()) {
            return Err(ConfigError::ValidationError(format!(
                "agents.roster contains duplicate name: {}",
                name
            )));
        }
    }

    Ok(())
}
