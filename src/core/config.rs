//! Configuration for a harbor simulation run
//!
//! This module holds the parameters of one run: how many ships and docks take
//! part, the rates of every random delay, and the lookup tables that depend on
//! ship size.

use super::error::SimulationError;
use super::random::DEFAULT_REJECTION_LIMIT;
use super::types::ShipSize;
use serde::{Deserialize, Serialize};

/// Configuration for a single harbor run
///
/// Rates are per hour. Every delay except the tugboat's empty relocation is
/// multiplied by `time_scale` before it reaches the clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarborConfig {
    /// Number of ships that arrive during the run
    pub ships: usize,
    /// Number of loading docks
    pub docks: usize,
    /// Rate of the exponential inter-arrival delay
    pub arrival_rate: f64,
    /// Rate of the tow from the port to a dock
    pub tow_in_rate: f64,
    /// Rate of the tow from a dock back out to the port
    pub tow_out_rate: f64,
    /// Rate of the tugboat crossing the harbor empty
    pub relocation_rate: f64,
    /// Factor converting sampled hours into clock units
    pub time_scale: f64,
    /// Probability of each ship size, indexed like [`ShipSize::ALL`]
    pub size_probabilities: Vec<f64>,
    /// (mean, variance) of the loading time for each ship size
    pub cargo_time_params: Vec<(f64, f64)>,
    /// Give up on the approximate normal after this many rejections
    pub normal_rejection_limit: u64,
    /// Seed for the random source; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Narrate every ship transition through the logger
    pub verbose: bool,
}

impl HarborConfig {
    /// Create a configuration with the default harbor parameters
    pub fn new() -> Self {
        Self {
            ships: 3,
            docks: 3,
            arrival_rate: 8.0,
            tow_in_rate: 2.0,
            tow_out_rate: 1.0,
            relocation_rate: 15.0,
            time_scale: 60.0,
            size_probabilities: vec![0.25, 0.25, 0.5],
            cargo_time_params: vec![(9.0, 1.0), (12.0, 2.0), (18.0, 3.0)],
            normal_rejection_limit: DEFAULT_REJECTION_LIMIT,
            seed: None,
            verbose: true,
        }
    }

    pub fn with_ships(mut self, ships: usize) -> Self {
        self.ships = ships;
        self
    }

    pub fn with_docks(mut self, docks: usize) -> Self {
        self.docks = docks;
        self
    }

    pub fn with_arrival_rate(mut self, rate: f64) -> Self {
        self.arrival_rate = rate;
        self
    }

    /// Set the tow-in and tow-out rates
    pub fn with_tow_rates(mut self, tow_in: f64, tow_out: f64) -> Self {
        self.tow_in_rate = tow_in;
        self.tow_out_rate = tow_out;
        self
    }

    pub fn with_relocation_rate(mut self, rate: f64) -> Self {
        self.relocation_rate = rate;
        self
    }

    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale;
        self
    }

    pub fn with_size_probabilities(mut self, probabilities: Vec<f64>) -> Self {
        self.size_probabilities = probabilities;
        self
    }

    pub fn with_cargo_time_params(mut self, params: Vec<(f64, f64)>) -> Self {
        self.cargo_time_params = params;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check the parameters before a run
    ///
    /// Zero docks is allowed: such a run deadlocks and reports it.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.ships == 0 {
            return Err(SimulationError::InvalidConfig(
                "at least one ship is required".to_string(),
            ));
        }

        let rates = [
            ("arrival_rate", self.arrival_rate),
            ("tow_in_rate", self.tow_in_rate),
            ("tow_out_rate", self.tow_out_rate),
            ("relocation_rate", self.relocation_rate),
            ("time_scale", self.time_scale),
        ];
        for (name, value) in rates {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.size_probabilities.len() != ShipSize::ALL.len() {
            return Err(SimulationError::InvalidConfig(format!(
                "expected {} size probabilities, got {}",
                ShipSize::ALL.len(),
                self.size_probabilities.len()
            )));
        }
        if self
            .size_probabilities
            .iter()
            .any(|p| !(p.is_finite() && *p >= 0.0))
        {
            return Err(SimulationError::InvalidConfig(
                "size probabilities must be finite and non-negative".to_string(),
            ));
        }

        if self.cargo_time_params.len() != ShipSize::ALL.len() {
            return Err(SimulationError::InvalidConfig(format!(
                "expected {} cargo time entries, got {}",
                ShipSize::ALL.len(),
                self.cargo_time_params.len()
            )));
        }
        if self
            .cargo_time_params
            .iter()
            .any(|(mean, variance)| !mean.is_finite() || !(variance.is_finite() && *variance >= 0.0))
        {
            return Err(SimulationError::InvalidConfig(
                "cargo time parameters must be finite with non-negative variance".to_string(),
            ));
        }

        Ok(())
    }

    /// (mean, variance) of the loading time for `size`
    pub fn cargo_time(&self, size: ShipSize) -> (f64, f64) {
        self.cargo_time_params[size.index()]
    }
}

impl Default for HarborConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarborConfig::default();
        assert_eq!(config.ships, 3);
        assert_eq!(config.docks, 3);
        assert_eq!(config.size_probabilities, vec![0.25, 0.25, 0.5]);
        assert_eq!(config.cargo_time(ShipSize::Large), (18.0, 3.0));
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = HarborConfig::new()
            .with_ships(10)
            .with_docks(2)
            .with_seed(42)
            .with_tow_rates(4.0, 3.0)
            .with_verbose(false);

        assert_eq!(config.ships, 10);
        assert_eq!(config.docks, 2);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tow_in_rate, 4.0);
        assert_eq!(config.tow_out_rate, 3.0);
        assert!(!config.verbose);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(HarborConfig::new().with_ships(0).validate().is_err());
        assert!(HarborConfig::new().with_arrival_rate(0.0).validate().is_err());
        assert!(HarborConfig::new().with_relocation_rate(f64::INFINITY).validate().is_err());
        assert!(HarborConfig::new().with_time_scale(-1.0).validate().is_err());
        assert!(HarborConfig::new()
            .with_size_probabilities(vec![0.5, 0.5])
            .validate()
            .is_err());
        assert!(HarborConfig::new()
            .with_size_probabilities(vec![-0.5, 1.0, 0.5])
            .validate()
            .is_err());
        assert!(HarborConfig::new()
            .with_cargo_time_params(vec![(9.0, -1.0), (12.0, 2.0), (18.0, 3.0)])
            .validate()
            .is_err());
    }

    #[test]
    fn test_zero_docks_is_valid() {
        assert!(HarborConfig::new().with_docks(0).validate().is_ok());
    }
}
