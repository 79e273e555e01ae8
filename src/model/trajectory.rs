// src/model/trajectory.rs

use nalgebra::RowDVector;

/// One row of a [`Trajectory`]: the grid time and the distribution at it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryPoint {
    pub time: f64,
    pub probabilities: Vec<f64>,
}

/// Time-indexed state probabilities, stored column-wise.
///
/// Column `i` holds the probability of state `i` at every recorded time;
/// `times()` is the matching time column. Rows keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    times: Vec<f64>,
    columns: Vec<Vec<f64>>,
}

impl Trajectory {
    /// Number of recorded time points.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn num_states(&self) -> usize {
        self.columns.len()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Probability column for one state.
    pub fn state(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    pub fn point(&self, row: usize) -> Option<TrajectoryPoint> {
        let time = *self.times.get(row)?;
        Some(TrajectoryPoint {
            time,
            probabilities: self.columns.iter().map(|col| col[row]).collect(),
        })
    }

    pub fn points(&self) -> impl Iterator<Item = TrajectoryPoint> + '_ {
        (0..self.len()).filter_map(move |row| self.point(row))
    }

    pub fn final_distribution(&self) -> Option<Vec<f64>> {
        self.len()
            .checked_sub(1)
            .and_then(|last| self.point(last))
            .map(|p| p.probabilities)
    }
}

/// Append-only builder; rows are timed `k·dt` for the `k`-th push.
#[derive(Debug)]
pub struct TrajectoryBuilder {
    dt: f64,
    times: Vec<f64>,
    columns: Vec<Vec<f64>>,
}

impl TrajectoryBuilder {
    /// Starts the table with `initial` at time zero, reserving room for `capacity` rows.
    pub fn new(dt: f64, initial: &RowDVector<f64>, capacity: usize) -> Self {
        let mut builder = Self {
            dt,
            times: Vec::with_capacity(capacity),
            columns: (0..initial.len())
                .map(|_| Vec::with_capacity(capacity))
                .collect(),
        };
        builder.push(initial);
        builder
    }

    pub fn push(&mut self, state: &RowDVector<f64>) {
        debug_assert_eq!(state.len(), self.columns.len());
        let row = self.times.len();
        self.times.push(row as f64 * self.dt);
        for (column, &p) in self.columns.iter_mut().zip(state.iter()) {
            column.push(p);
        }
    }

    pub fn finish(self) -> Trajectory {
        Trajectory {
            times: self.times,
            columns: self.columns,
        }
    }
}
