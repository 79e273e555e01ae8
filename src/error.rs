// src/error.rs

//! Error type shared by both steppers and the driver I/O.
//!
//! Every failure is fatal for the run that raised it: simulators validate
//! their inputs before producing any output, so a caller either gets a
//! complete trajectory / profit sample or one of these errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Two inputs that must agree in size do not.
    #[error("dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// `I + dt·Q` has a negative diagonal entry, so mass would go negative.
    #[error("P[{index},{index}] = {value:.3} with dt = {dt}: time step too big")]
    StepTooLarge { index: usize, value: f64, dt: f64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;

/// Returns `Err(SimError::InvalidArgument(..))` when `$cond` is false.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::error::SimError::InvalidArgument(format!($($msg)*)));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive(x: f64) -> Result<f64> {
        ensure!(x > 0.0, "x must be positive, got {x}");
        Ok(x)
    }

    #[test]
    fn ensure_maps_to_invalid_argument() {
        assert_eq!(positive(2.0).unwrap(), 2.0);
        match positive(-1.0) {
            Err(SimError::InvalidArgument(msg)) => assert!(msg.contains("-1")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn step_error_names_index_and_value() {
        let err = SimError::StepTooLarge {
            index: 2,
            value: -0.5,
            dt: 1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("P[2,2]"));
        assert!(msg.contains("-0.500"));
        assert!(msg.contains("time step too big"));
    }
}
