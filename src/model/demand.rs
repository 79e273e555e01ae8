// src/model/demand.rs

use crate::error::{Result, SimError};
use rand::Rng;
use rand_distr::{Distribution, Poisson};

/// Daily customer demand.
#[derive(Debug, Clone, Copy)]
pub enum DemandDistribution {
    Poisson(Poisson<f64>),
    /// Deterministic demand. A zero mean lands here since `Poisson`
    /// needs a strictly positive rate.
    Constant(u64),
}

impl DemandDistribution {
    pub fn poisson(mean: f64) -> Result<Self> {
        crate::ensure!(
            mean.is_finite() && mean >= 0.0,
            "mean demand must be finite and non-negative, got {mean}"
        );
        if mean == 0.0 {
            return Ok(Self::Constant(0));
        }
        let poisson = Poisson::new(mean)
            .map_err(|e| SimError::InvalidArgument(format!("poisson({mean}): {e}")))?;
        Ok(Self::Poisson(poisson))
    }
}

impl Distribution<u64> for DemandDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        match self {
            Self::Poisson(poisson) => {
                let draw: f64 = poisson.sample(rng);
                draw as u64
            }
            Self::Constant(value) => *value,
        }
    }
}
