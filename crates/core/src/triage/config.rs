//! Ranking configuration.

use serde::{Deserialize, Serialize};

/// Weights applied by the priority function.
///
/// `rank = -(severity_weight * severity + wait_weight * hours_waiting)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    /// Weight on the raw severity value.
    #[serde(default = "default_severity_weight")]
    pub severity_weight: f64,

    /// Weight on waiting time, measured in hours.
    #[serde(default = "default_wait_weight")]
    pub wait_weight: f64,
}

fn default_severity_weight() -> f64 {
    0.7
}

fn default_wait_weight() -> f64 {
    0.3
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            severity_weight: default_severity_weight(),
            wait_weight: default_wait_weight(),
        }
    }
}

impl PriorityWeights {
    /// Create weights from explicit values.
    pub fn new(severity_weight: f64, wait_weight: f64) -> Self {
        Self {
            severity_weight,
            wait_weight,
        }
    }

    /// Check that the weights can produce a meaningful ordering.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("severity_weight", self.severity_weight),
            ("wait_weight", self.wait_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                ));
            }
        }
        if self.severity_weight == 0.0 && self.wait_weight == 0.0 {
            return Err("severity_weight and wait_weight cannot both be 0".to_string());
        }
        Ok(())
    }
}
