//! Random variates driving the harbor timings.
//!
//! All samples come from one generator so a seeded run is reproducible.
//! The approximate normal is the exponential-rejection construction: it
//! yields `mean + |Z| * sqrt(variance)`, a right-skewed variate that never
//! falls below `mean`.

use super::error::SimulationError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Open01, Standard};
use std::str::FromStr;

/// Default cap on consecutive rejections in [`VariateGenerator::approx_normal`]
pub const DEFAULT_REJECTION_LIMIT: u64 = 1_000_000;

/// Distribution families the generator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionKind {
    Uniform,
    Exponential,
    ApproxNormal,
}

impl FromStr for DistributionKind {
    type Err = SimulationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "uniform" => Ok(DistributionKind::Uniform),
            "exp" | "exponential" => Ok(DistributionKind::Exponential),
            "normal" | "approx_normal" => Ok(DistributionKind::ApproxNormal),
            _ => Err(SimulationError::UnsupportedDistribution(name.to_string())),
        }
    }
}

/// A fully parameterised distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Variate {
    Uniform { low: f64, high: f64 },
    Exponential { rate: f64 },
    ApproxNormal { mean: f64, variance: f64 },
}

impl Variate {
    /// Build a variate from a kind and its positional parameters
    pub fn from_kind(kind: DistributionKind, params: &[f64]) -> Result<Self, SimulationError> {
        let expected = match kind {
            DistributionKind::Exponential => 1,
            DistributionKind::Uniform | DistributionKind::ApproxNormal => 2,
        };
        if params.len() != expected {
            return Err(SimulationError::InvalidParameter(format!(
                "{:?} takes {} parameter(s), got {}",
                kind,
                expected,
                params.len()
            )));
        }

        Ok(match kind {
            DistributionKind::Uniform => Variate::Uniform {
                low: params[0],
                high: params[1],
            },
            DistributionKind::Exponential => Variate::Exponential { rate: params[0] },
            DistributionKind::ApproxNormal => Variate::ApproxNormal {
                mean: params[0],
                variance: params[1],
            },
        })
    }

    /// Parse a distribution name and build it in one step
    pub fn parse(name: &str, params: &[f64]) -> Result<Self, SimulationError> {
        Self::from_kind(name.parse()?, params)
    }
}

/// Source of the uniform, exponential and approximate-normal samples
pub struct VariateGenerator<R = StdRng> {
    rng: R,
    rejection_limit: u64,
}

impl VariateGenerator<StdRng> {
    /// Deterministic generator
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> VariateGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            rejection_limit: DEFAULT_REJECTION_LIMIT,
        }
    }

    pub fn with_rejection_limit(mut self, limit: u64) -> Self {
        self.rejection_limit = limit;
        self
    }

    /// Draw from any supported distribution
    pub fn sample(&mut self, variate: Variate) -> Result<f64, SimulationError> {
        match variate {
            Variate::Uniform { low, high } => self.uniform(low, high),
            Variate::Exponential { rate } => self.exponential(rate),
            Variate::ApproxNormal { mean, variance } => self.approx_normal(mean, variance),
        }
    }

    /// Real in `[a, b)`
    pub fn uniform(&mut self, a: f64, b: f64) -> Result<f64, SimulationError> {
        if !a.is_finite() || !b.is_finite() || b < a {
            return Err(SimulationError::InvalidParameter(format!(
                "uniform bounds [{}, {})",
                a, b
            )));
        }
        let u: f64 = Standard.sample(&mut self.rng);
        Ok(a + (b - a) * u)
    }

    /// `-(1/rate) * ln(U)` with `U` in the open interval (0, 1)
    pub fn exponential(&mut self, rate: f64) -> Result<f64, SimulationError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "exponential rate {}",
                rate
            )));
        }
        // Open01 excludes zero even when the underlying source yields zeros
        let u: f64 = Open01.sample(&mut self.rng);
        Ok(-(1.0 / rate) * u.ln())
    }

    /// `mean + Y * sqrt(variance)` where `Y` survives the exponential rejection test
    pub fn approx_normal(&mut self, mean: f64, variance: f64) -> Result<f64, SimulationError> {
        if !mean.is_finite() || !(variance.is_finite() && variance >= 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "approximate normal ({}, {})",
                mean, variance
            )));
        }

        for _ in 0..self.rejection_limit {
            let y1 = self.exponential(1.0)?;
            let y2 = self.exponential(1.0)?;
            let v = y2 - (y1 - 1.0).powi(2) / 2.0;
            if v > 0.0 {
                return Ok(mean + y1 * variance.sqrt());
            }
        }
        Err(SimulationError::RejectionLimit(self.rejection_limit))
    }

    /// Index of the first category whose running probability sum reaches a uniform draw.
    ///
    /// Zero-probability categories are never selected.
    pub fn weighted_choice(&mut self, probabilities: &[f64]) -> Result<usize, SimulationError> {
        let u: f64 = Standard.sample(&mut self.rng);
        let mut interval = 0.0;
        for (index, p) in probabilities.iter().enumerate() {
            interval += p;
            if *p > 0.0 && u <= interval {
                return Ok(index);
            }
        }
        Err(SimulationError::ProbabilitySum {
            draw: u,
            total: interval,
        })
    }
}
