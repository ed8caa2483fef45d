use super::error::SimulationError;
use super::types::TugboatPosition;
use log::debug;

/// The single tugboat shared by every ship in the harbor.
///
/// A task tows one ship from a pick-up side to a drop-off side. When the
/// tugboat waits on the wrong side it first crosses empty, and that crossing
/// costs time the caller adds to the clock straight away.
#[derive(Debug, Clone)]
pub struct Tugboat {
    position: TugboatPosition,
    busy: bool,
}

impl Tugboat {
    pub fn new(position: TugboatPosition) -> Self {
        Self {
            position,
            busy: false,
        }
    }

    pub fn position(&self) -> TugboatPosition {
        self.position
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Start a towing task.
    ///
    /// `relocation` is only sampled when the tugboat has to cross empty to
    /// `pickup`; the sampled cost is returned. After the call the tugboat is
    /// busy and counted as being at `dropoff`.
    pub fn dispatch<F>(
        &mut self,
        pickup: TugboatPosition,
        dropoff: TugboatPosition,
        relocation: F,
    ) -> Result<Option<f64>, SimulationError>
    where
        F: FnOnce() -> Result<f64, SimulationError>,
    {
        if self.busy {
            return Err(SimulationError::InvariantViolation(
                "tugboat dispatched while already towing".to_string(),
            ));
        }

        let cost = if self.position != pickup {
            let cost = relocation()?;
            debug!("Tugboat crosses empty to the {} in {:.3}", pickup, cost);
            Some(cost)
        } else {
            None
        };

        self.position = dropoff;
        self.busy = true;
        Ok(cost)
    }

    /// Finish the current task
    pub fn release(&mut self) {
        self.busy = false;
    }
}

impl Default for Tugboat {
    fn default() -> Self {
        Self::new(TugboatPosition::AtDocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_without_relocation() {
        let mut tug = Tugboat::new(TugboatPosition::AtDocks);
        let cost = tug
            .dispatch(TugboatPosition::AtDocks, TugboatPosition::AtPort, || {
                panic!("no relocation expected")
            })
            .unwrap();
        assert_eq!(cost, None);
        assert!(tug.is_busy());
        assert_eq!(tug.position(), TugboatPosition::AtPort);
    }

    #[test]
    fn test_dispatch_with_relocation() {
        let mut tug = Tugboat::default();
        let cost = tug
            .dispatch(TugboatPosition::AtPort, TugboatPosition::AtDocks, || Ok(0.25))
            .unwrap();
        assert_eq!(cost, Some(0.25));
        assert_eq!(tug.position(), TugboatPosition::AtDocks);
    }

    #[test]
    fn test_busy_tugboat_cannot_be_dispatched() {
        let mut tug = Tugboat::default();
        tug.dispatch(TugboatPosition::AtDocks, TugboatPosition::AtPort, || Ok(0.0))
            .unwrap();
        let second = tug.dispatch(TugboatPosition::AtPort, TugboatPosition::AtDocks, || Ok(0.0));
        assert!(matches!(second, Err(SimulationError::InvariantViolation(_))));

        tug.release();
        assert!(!tug.is_busy());
        assert!(tug
            .dispatch(TugboatPosition::AtPort, TugboatPosition::AtDocks, || Ok(0.0))
            .is_ok());
    }
}
