use serde::{Deserialize, Serialize};
use std::path::Path;

use super::*;

/// Aspect tolerance in degrees when nothing else is configured.
pub const DEFAULT_ORB: f64 = 6.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Maximum deviation, in degrees, from an exact aspect angle.
    pub orb: f64,
    pub wrap_policy: WrapPolicy,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            orb: DEFAULT_ORB,
            wrap_policy: WrapPolicy::default(),
        }
    }
}

impl InterpreterConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let contents = std::fs::read_to_string(path)?;
        let config: InterpreterConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if !self.orb.is_finite() || !(0.0..=180.0).contains(&self.orb) {
            return Err(ChartError::Config(format!(
                "orb must be between 0 and 180 degrees, got {}",
                self.orb
            )));
        }
        Ok(())
    }
}
