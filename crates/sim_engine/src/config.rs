//! Configuration system

use serde::{Deserialize, Serialize};

use crate::clock::{LoopMetrics, SimulationClock};
use crate::error::SimulationError;

/// Configuration trait
///
/// Supports TOML and RON files, keyed on the file extension.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Fails on IO errors, parse errors, or an unsupported extension.
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Fails on IO errors, serialization errors, or an unsupported extension.
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Simulation loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Target fixed updates per second
    pub updates_per_second: f64,

    /// Throughput measurement interval in milliseconds
    pub measurement_interval_ms: f64,
}

impl SimConfig {
    /// Create a configuration with default rates
    pub fn new() -> Self {
        Self {
            updates_per_second: 60.0,
            measurement_interval_ms: LoopMetrics::DEFAULT_INTERVAL_MS,
        }
    }

    /// Set the fixed update rate
    pub fn with_updates_per_second(mut self, updates_per_second: f64) -> Self {
        self.updates_per_second = updates_per_second;
        self
    }

    /// The fixed step length in milliseconds
    pub fn fixed_step_ms(&self) -> f64 {
        1000.0 / self.updates_per_second
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Reports the first non-positive rate.
    pub fn validate(&self) -> Result<(), String> {
        if self.updates_per_second <= 0.0 {
            return Err(format!(
                "updates_per_second must be positive, got {}",
                self.updates_per_second
            ));
        }

        if self.measurement_interval_ms <= 0.0 {
            return Err(format!(
                "measurement_interval_ms must be positive, got {}",
                self.measurement_interval_ms
            ));
        }

        Ok(())
    }

    /// Build a simulation clock from this configuration
    ///
    /// # Errors
    ///
    /// Rejects non-positive rates.
    pub fn clock(&self) -> Result<SimulationClock, SimulationError> {
        SimulationClock::from_updates_per_second(self.updates_per_second)?
            .with_measurement_interval(self.measurement_interval_ms)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for SimConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();

        assert!(config.validate().is_ok());
        assert_relative_eq!(config.fixed_step_ms(), 1000.0 / 60.0);
    }

    #[test]
    fn test_validate_rejects_non_positive_rates() {
        let config = SimConfig::default().with_updates_per_second(0.0);
        assert!(config.validate().is_err());

        let config = SimConfig {
            measurement_interval_ms: -1.0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clock_uses_configured_step() {
        let config = SimConfig::default().with_updates_per_second(120.0);
        let clock = config.clock().unwrap();

        assert_relative_eq!(clock.fixed_step_ms(), 1000.0 / 120.0);
    }

    #[test]
    fn test_parses_toml() {
        let parsed: SimConfig =
            toml::from_str("updates_per_second = 90.0\nmeasurement_interval_ms = 250.0").unwrap();

        assert_relative_eq!(parsed.updates_per_second, 90.0);
        assert_relative_eq!(parsed.measurement_interval_ms, 250.0);
    }
}
