use super::types::{ShipId, Transition};
use serde::{Deserialize, Serialize};

/// A ship transition scheduled at a point in simulated time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub time: f64,
    pub ship: ShipId,
    pub transition: Transition,
}

impl Event {
    pub fn new(time: f64, ship: ShipId, transition: Transition) -> Self {
        Self {
            time,
            ship,
            transition,
        }
    }
}
