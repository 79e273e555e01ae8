// src/model/transition.rs

use crate::error::{Result, SimError};
use crate::model::generator::GeneratorMatrix;
use nalgebra::{DMatrix, RowDVector};

/// Discrete-time operator `P = I + dt·Q` for a fixed step.
///
/// Construction fails unless every diagonal entry of `P` is non-negative;
/// with a proper generator that makes `P` a stochastic matrix.
#[derive(Debug, Clone)]
pub struct TransitionOperator {
    matrix: DMatrix<f64>,
}

impl TransitionOperator {
    pub fn from_generator(generator: &GeneratorMatrix, dt: f64) -> Result<Self> {
        crate::ensure!(
            dt.is_finite() && dt > 0.0,
            "time step must be positive and finite, got {dt}"
        );

        let n = generator.dim();
        let matrix = generator.matrix() * dt + DMatrix::<f64>::identity(n, n);

        for i in 0..n {
            let value = matrix[(i, i)];
            if value.is_nan() || value < 0.0 {
                return Err(SimError::StepTooLarge { index: i, value, dt });
            }
        }

        Ok(Self { matrix })
    }

    /// One step of the chain: `state · P`.
    pub fn apply(&self, state: &RowDVector<f64>) -> RowDVector<f64> {
        state * &self.matrix
    }

    /// Every entry is non-negative and each row sums to one within `tol`.
    pub fn is_stochastic(&self, tol: f64) -> bool {
        let entries_ok = self.matrix.iter().all(|&p| p >= -tol);
        let rows_ok = self
            .matrix
            .row_iter()
            .all(|row| (row.sum() - 1.0).abs() <= tol);
        entries_ok && rows_ok
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}
