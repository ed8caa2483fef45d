use super::types::ShipSize;
use serde::{Deserialize, Serialize};

/// Timestamps of one ship, in clock units. Unset stamps read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipTimings {
    pub size: Option<ShipSize>,
    pub arrival_time: f64,
    pub dock_arrival_time: f64,
    pub dock_departure_time: f64,
    pub departure_time: f64,
}

impl ShipTimings {
    /// Departure minus arrival
    pub fn time_in_harbor(&self) -> f64 {
        self.departure_time - self.arrival_time
    }

    /// Dock departure minus dock arrival
    pub fn time_in_dock(&self) -> f64 {
        self.dock_departure_time - self.dock_arrival_time
    }
}

/// Outcome of one complete harbor run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub ships: Vec<ShipTimings>,
    pub final_clock: f64,
    pub transitions_executed: usize,
    pub transitions_deferred: usize,
}

impl RunReport {
    pub fn mean_time_in_harbor(&self) -> f64 {
        mean(self.ships.iter().map(ShipTimings::time_in_harbor))
    }

    pub fn mean_time_in_dock(&self) -> f64 {
        mean(self.ships.iter().map(ShipTimings::time_in_dock))
    }
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_times() {
        let ship = ShipTimings {
            size: Some(ShipSize::Medium),
            arrival_time: 10.0,
            dock_arrival_time: 40.0,
            dock_departure_time: 700.0,
            departure_time: 700.0,
        };
        assert_eq!(ship.time_in_harbor(), 690.0);
        assert_eq!(ship.time_in_dock(), 660.0);
    }

    #[test]
    fn test_report_means() {
        let report = RunReport {
            ships: vec![
                ShipTimings {
                    arrival_time: 0.0,
                    departure_time: 100.0,
                    ..Default::default()
                },
                ShipTimings {
                    arrival_time: 50.0,
                    departure_time: 250.0,
                    ..Default::default()
                },
            ],
            final_clock: 250.0,
            transitions_executed: 12,
            transitions_deferred: 0,
        };
        assert_eq!(report.mean_time_in_harbor(), 150.0);
        assert_eq!(report.mean_time_in_dock(), 0.0);
    }

    #[test]
    fn test_mean_of_nothing() {
        assert_eq!(mean(std::iter::empty()), 0.0);
    }
}
