// src/model/generator.rs

use crate::error::{Result, SimError};
use nalgebra::DMatrix;

/// Rate matrix `Q` of a continuous-time Markov chain.
///
/// Off-diagonal entries are transition rates and each row is expected to sum
/// to zero. Only squareness is enforced on construction; the rate contract is
/// the caller's to uphold (see [`GeneratorMatrix::check_rates`]).
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorMatrix(DMatrix<f64>);

impl GeneratorMatrix {
    pub fn new(matrix: DMatrix<f64>) -> Result<Self> {
        if matrix.nrows() != matrix.ncols() {
            return Err(SimError::DimensionMismatch {
                what: "generator columns",
                expected: matrix.nrows(),
                found: matrix.ncols(),
            });
        }
        crate::ensure!(matrix.nrows() > 0, "generator must have at least one state");
        Ok(Self(matrix))
    }

    /// Build from row-major rows. Ragged input is a dimension error.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(SimError::DimensionMismatch {
                    what: "generator row length",
                    expected: n,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::new(DMatrix::from_row_slice(n, n, &data))
    }

    /// Number of states.
    pub fn dim(&self) -> usize {
        self.0.nrows()
    }

    pub fn rate(&self, from: usize, to: usize) -> f64 {
        self.0[(from, to)]
    }

    /// Total outgoing rate of state `i`, i.e. `|Q[i,i]|`.
    pub fn exit_rate(&self, i: usize) -> f64 {
        self.0[(i, i)].abs()
    }

    pub fn max_exit_rate(&self) -> f64 {
        (0..self.dim()).map(|i| self.exit_rate(i)).fold(0.0, f64::max)
    }

    /// Largest `dt` for which `I + dt·Q` keeps a non-negative diagonal.
    /// Infinite when no state has an outgoing rate.
    pub fn max_stable_dt(&self) -> f64 {
        let rate = self.max_exit_rate();
        if rate == 0.0 {
            f64::INFINITY
        } else {
            1.0 / rate
        }
    }

    /// Explicit check of the generator contract: off-diagonal rates are
    /// non-negative and every row sums to zero within `tol`.
    pub fn check_rates(&self, tol: f64) -> Result<()> {
        for i in 0..self.dim() {
            let mut row_sum = 0.0;
            for j in 0..self.dim() {
                let q = self.0[(i, j)];
                crate::ensure!(q.is_finite(), "Q[{i},{j}] is not finite");
                if i != j {
                    crate::ensure!(q >= 0.0, "Q[{i},{j}] = {q} is a negative rate");
                }
                row_sum += q;
            }
            crate::ensure!(
                row_sum.abs() <= tol,
                "row {i} of the generator sums to {row_sum}, not 0"
            );
        }
        Ok(())
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.0
    }
}
