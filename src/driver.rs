//! Repeated harbor runs and the statistics gathered across them.

use crate::core::config::HarborConfig;
use crate::core::error::SimulationError;
use crate::core::harbor::HarborSimulation;
use crate::core::report::{mean, RunReport};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Aggregate turnaround figures over every ship of every run, in hours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub runs: usize,
    pub ships_per_run: usize,
    pub mean_turnaround_hours: f64,
    pub mean_dock_hours: f64,
    pub max_turnaround_hours: f64,
}

/// Runs the same harbor configuration several times in sequence
#[derive(Debug, Clone)]
pub struct Experiment {
    config: HarborConfig,
    tries: usize,
}

impl Experiment {
    pub fn new(config: HarborConfig, tries: usize) -> Self {
        Self { config, tries }
    }

    /// Configuration of run `index`; seeded runs use `seed + index`
    pub fn run_config(&self, index: usize) -> HarborConfig {
        let mut config = self.config.clone();
        if let Some(seed) = config.seed {
            config.seed = Some(seed.wrapping_add(index as u64));
        }
        config
    }

    /// Execute every run and return their reports
    pub fn run_all(&self) -> Result<Vec<RunReport>, SimulationError> {
        if self.tries == 0 {
            return Err(SimulationError::InvalidConfig(
                "at least one run is required".to_string(),
            ));
        }

        let mut reports = Vec::with_capacity(self.tries);
        for index in 0..self.tries {
            info!("Starting a new harbor simulation ({}/{})", index + 1, self.tries);
            let mut simulation = HarborSimulation::new(self.run_config(index))?;
            let report = simulation.run()?;
            debug!(
                "Run {} finished at {:.3} with {} deferred transitions",
                index, report.final_clock, report.transitions_deferred
            );
            reports.push(report);
        }
        Ok(reports)
    }

    /// Execute every run and summarise them
    pub fn run(&self) -> Result<ExperimentSummary, SimulationError> {
        let reports = self.run_all()?;
        let summary = self.summarize(&reports);
        info!(
            "The mean of the ships turn around time is {:.4} hours",
            summary.mean_turnaround_hours
        );
        Ok(summary)
    }

    /// Convert clock units to hours and average over all ships
    pub fn summarize(&self, reports: &[RunReport]) -> ExperimentSummary {
        let scale = self.config.time_scale;
        let ships = || reports.iter().flat_map(|report| report.ships.iter());
        let turnaround: Vec<f64> = ships().map(|ship| ship.time_in_harbor() / scale).collect();
        let dock = ships().map(|ship| ship.time_in_dock() / scale);

        ExperimentSummary {
            runs: reports.len(),
            ships_per_run: self.config.ships,
            mean_turnaround_hours: mean(turnaround.iter().copied()),
            mean_dock_hours: mean(dock),
            max_turnaround_hours: turnaround.iter().copied().fold(0.0, f64::max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::ShipTimings;

    fn config() -> HarborConfig {
        HarborConfig::new()
            .with_ships(4)
            .with_docks(2)
            .with_seed(1000)
            .with_verbose(false)
    }

    #[test]
    fn test_run_seeds_advance() {
        let experiment = Experiment::new(config(), 3);
        assert_eq!(experiment.run_config(0).seed, Some(1000));
        assert_eq!(experiment.run_config(2).seed, Some(1002));

        let unseeded = Experiment::new(HarborConfig::new(), 3);
        assert_eq!(unseeded.run_config(1).seed, None);
    }

    #[test]
    fn test_run_all_produces_one_report_per_try() {
        let reports = Experiment::new(config(), 5).run_all().unwrap();
        assert_eq!(reports.len(), 5);
        assert!(reports.iter().all(|report| report.ships.len() == 4));
        assert_ne!(reports[0], reports[1]);
    }

    #[test]
    fn test_zero_tries_rejected() {
        assert!(Experiment::new(config(), 0).run().is_err());
    }

    #[test]
    fn test_summary_converts_to_hours() {
        let experiment = Experiment::new(config().with_ships(2), 2);
        let ship = |arrival: f64, departure: f64| ShipTimings {
            arrival_time: arrival,
            dock_arrival_time: arrival + 30.0,
            dock_departure_time: departure,
            departure_time: departure,
            ..Default::default()
        };
        let reports = vec![
            RunReport {
                ships: vec![ship(0.0, 600.0), ship(60.0, 780.0)],
                final_clock: 780.0,
                transitions_executed: 12,
                transitions_deferred: 0,
            },
            RunReport {
                ships: vec![ship(0.0, 480.0), ship(0.0, 840.0)],
                final_clock: 840.0,
                transitions_executed: 12,
                transitions_deferred: 1,
            },
        ];

        let summary = experiment.summarize(&reports);
        assert_eq!(summary.runs, 2);
        assert_eq!(summary.ships_per_run, 2);
        // 10h, 12h, 8h, 14h
        assert!((summary.mean_turnaround_hours - 11.0).abs() < 1e-12);
        assert!((summary.mean_dock_hours - 10.5).abs() < 1e-12);
        assert_eq!(summary.max_turnaround_hours, 14.0);
    }

    #[test]
    fn test_default_harbor_turnaround_is_plausible() {
        let summary = Experiment::new(HarborConfig::new().with_seed(7).with_verbose(false), 10)
            .run()
            .unwrap();
        // Loading alone takes at least nine hours
        assert!(summary.mean_turnaround_hours > 9.0);
        assert!(summary.max_turnaround_hours >= summary.mean_turnaround_hours);
    }
}
