//! Simulator configuration

use crate::error::{Result, SimulatorError};
use qflip_state::NORMALIZATION_TOLERANCE;
use serde::{Deserialize, Serialize};

/// How measurement randomness is sourced across requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RngMode {
    /// A fresh generator for every request
    ///
    /// With a seed, request `k` uses `seed + k`, so a whole run is
    /// reproducible while individual requests still differ.
    #[default]
    PerRequest,

    /// One generator shared by all requests behind a mutex
    Shared,
}

/// Configuration for the quantum simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Random number generator seed for reproducibility
    ///
    /// If None, generators are seeded from OS entropy.
    ///
    /// Default: None (random)
    pub seed: Option<u64>,

    /// Per-request or shared random source
    ///
    /// Default: PerRequest
    pub rng_mode: RngMode,

    /// Shot count used when a caller does not ask for one
    ///
    /// Default: 100
    pub default_shots: usize,

    /// Upper bound applied by [`SimulatorConfig::clamp_shots`]
    ///
    /// Default: 10000
    pub max_shots: usize,

    /// Drift of the probability total tolerated before renormalizing
    ///
    /// Default: 1e-6
    pub normalization_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            rng_mode: RngMode::PerRequest,
            default_shots: 100,
            max_shots: 10_000,
            normalization_tolerance: NORMALIZATION_TOLERANCE,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fully reproducible configuration
    ///
    /// A single seeded generator is shared by every request, so the sequence
    /// of outcomes from one service instance is fixed by `seed`.
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            rng_mode: RngMode::Shared,
            ..Default::default()
        }
    }

    /// Create a configuration for debugging
    pub fn debug() -> Self {
        Self::deterministic(42)
    }

    /// Set the random seed for deterministic execution
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set how the random source is shared
    pub fn with_rng_mode(mut self, mode: RngMode) -> Self {
        self.rng_mode = mode;
        self
    }

    /// Set the default number of shots
    pub fn with_default_shots(mut self, shots: usize) -> Self {
        self.default_shots = shots;
        self
    }

    /// Set the maximum number of shots
    pub fn with_max_shots(mut self, shots: usize) -> Self {
        self.max_shots = shots;
        self
    }

    /// Set the normalization tolerance
    pub fn with_normalization_tolerance(mut self, tolerance: f64) -> Self {
        self.normalization_tolerance = tolerance;
        self
    }

    /// Clamp a caller-supplied shot count to `[1, max_shots]`
    pub fn clamp_shots(&self, requested: i64) -> usize {
        let max = i64::try_from(self.max_shots).unwrap_or(i64::MAX);
        // max_shots >= 1 once validated
        requested.clamp(1, max.max(1)) as usize
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_shots == 0 {
            return Err(SimulatorError::InvalidConfig(
                "max_shots must be > 0".to_string(),
            ));
        }

        if self.default_shots == 0 || self.default_shots > self.max_shots {
            return Err(SimulatorError::InvalidConfig(format!(
                "default_shots must be in [1, {}], got {}",
                self.max_shots, self.default_shots
            )));
        }

        if !self.normalization_tolerance.is_finite() || self.normalization_tolerance <= 0.0 {
            return Err(SimulatorError::InvalidConfig(format!(
                "normalization_tolerance must be positive, got {}",
                self.normalization_tolerance
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulatorConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.rng_mode, RngMode::PerRequest);
        assert_eq!(config.default_shots, 100);
        assert_eq!(config.max_shots, 10_000);
        assert_eq!(config.normalization_tolerance, 1e-6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deterministic_config() {
        let config = SimulatorConfig::deterministic(7);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.rng_mode, RngMode::Shared);
        assert_eq!(SimulatorConfig::debug().seed, Some(42));
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimulatorConfig::new()
            .with_seed(42)
            .with_rng_mode(RngMode::Shared)
            .with_default_shots(500)
            .with_max_shots(1000);

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.rng_mode, RngMode::Shared);
        assert_eq!(config.default_shots, 500);
        assert_eq!(config.max_shots, 1000);
    }

    #[test]
    fn test_clamp_shots() {
        let config = SimulatorConfig::default();
        assert_eq!(config.clamp_shots(-5), 1);
        assert_eq!(config.clamp_shots(0), 1);
        assert_eq!(config.clamp_shots(250), 250);
        assert_eq!(config.clamp_shots(50_000), 10_000);
    }

    #[test]
    fn test_validate() {
        let invalid = SimulatorConfig {
            max_shots: 0,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());

        let invalid = SimulatorConfig {
            default_shots: 20_000,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());

        let invalid = SimulatorConfig::new().with_normalization_tolerance(f64::NAN);
        assert!(matches!(
            invalid.validate(),
            Err(SimulatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SimulatorConfig =
            serde_json::from_str(r#"{"seed": 9, "rng_mode": "shared"}"#).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.rng_mode, RngMode::Shared);
        assert_eq!(config.max_shots, 10_000);
    }
}
