use super::error::SimulationError;

/// Loading berths, counted as free slots out of a fixed capacity
#[derive(Debug, Clone)]
pub struct Docks {
    capacity: usize,
    free: usize,
}

impl Docks {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            free: capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn free(&self) -> usize {
        self.free
    }

    pub fn has_free(&self) -> bool {
        self.free > 0
    }

    /// Take one free dock
    pub fn occupy(&mut self) -> Result<(), SimulationError> {
        self.free = self.free.checked_sub(1).ok_or_else(|| {
            SimulationError::InvariantViolation("no free dock to occupy".to_string())
        })?;
        Ok(())
    }

    /// Give one dock back
    pub fn release(&mut self) -> Result<(), SimulationError> {
        if self.free >= self.capacity {
            return Err(SimulationError::InvariantViolation(format!(
                "releasing a dock with all {} already free",
                self.capacity
            )));
        }
        self.free += 1;
        Ok(())
    }
}
