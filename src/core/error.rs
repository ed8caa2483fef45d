//! Error types for the harbor simulation.

use thiserror::Error;

/// Errors raised while configuring or running a harbor simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The cumulative probability never reached the uniform draw.
    #[error("probabilities sum to {total}, which never reaches the draw {draw}; they should sum to 1")]
    ProbabilitySum { draw: f64, total: f64 },

    /// A distribution was requested by a name the generator does not know.
    #[error("unsupported distribution: {0}")]
    UnsupportedDistribution(String),

    /// A distribution parameter is outside its domain.
    #[error("invalid distribution parameter: {0}")]
    InvalidParameter(String),

    /// The approximate-normal rejection loop gave up.
    #[error("approximate normal rejected {0} consecutive draws")]
    RejectionLimit(u64),

    /// The simulation configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A whole scan over the pending events executed nothing.
    #[error("no pending event can execute at clock {clock} ({pending} pending)")]
    Deadlock { clock: f64, pending: usize },

    /// Resource or timestamp bookkeeping went out of bounds.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
