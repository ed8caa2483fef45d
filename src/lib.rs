pub mod core;
pub mod driver;

// Re-export commonly used types
pub use crate::core::config::HarborConfig;
pub use crate::core::error::SimulationError;
pub use crate::core::event::Event;
pub use crate::core::harbor::HarborSimulation;
pub use crate::core::observer::{HarborObserver, Outcome, TransitionLog, TransitionRecord};
pub use crate::core::report::{RunReport, ShipTimings};
pub use crate::core::types::{ShipId, ShipSize, Transition, TugboatPosition};
pub use crate::driver::{Experiment, ExperimentSummary};
