// src/simulation/ctmc.rs

use crate::error::{Result, SimError};
use crate::model::generator::GeneratorMatrix;
use crate::model::trajectory::{Trajectory, TrajectoryBuilder};
use crate::model::transition::TransitionOperator;
use crate::simulation::config::{CtmcConfig, TimeBoundary};
use nalgebra::RowDVector;

/// Relative slack when counting whole steps in `horizon / dt`.
const STEP_COUNT_TOLERANCE: f64 = 1e-9;

/// Largest trajectory, initial point included, that a single run may record.
pub const MAX_TRAJECTORY_POINTS: usize = 10_000_000;

/// Number of `dt` steps taken for `horizon` under the given boundary rule.
///
/// Fails when the trajectory would exceed [`MAX_TRAJECTORY_POINTS`].
pub fn step_count(horizon: f64, dt: f64, boundary: TimeBoundary) -> Result<usize> {
    let quotient = (horizon / dt * (1.0 + STEP_COUNT_TOLERANCE)).floor();
    crate::ensure!(
        quotient.is_finite() && quotient >= 0.0 && quotient < MAX_TRAJECTORY_POINTS as f64,
        "horizon {horizon} / dt {dt} needs more than {MAX_TRAJECTORY_POINTS} points"
    );

    let whole = quotient as usize;
    let steps = match boundary {
        TimeBoundary::Overshoot => whole + 1,
        TimeBoundary::Inclusive => whole,
    };
    crate::ensure!(
        steps < MAX_TRAJECTORY_POINTS,
        "horizon {horizon} / dt {dt} needs more than {MAX_TRAJECTORY_POINTS} points"
    );
    Ok(steps)
}

/// Integrates the chain forward from `initial_state` with fixed step `config.dt`.
///
/// All inputs are validated before the first step; the returned trajectory
/// starts with `initial_state` at time zero.
pub fn simulate_ctmc(
    horizon: f64,
    initial_state: &[f64],
    generator: &GeneratorMatrix,
    config: &CtmcConfig,
) -> Result<Trajectory> {
    crate::ensure!(
        horizon.is_finite() && horizon > 0.0,
        "horizon must be positive and finite, got {horizon}"
    );
    config.validate()?;

    if initial_state.len() != generator.dim() {
        return Err(SimError::DimensionMismatch {
            what: "initial state",
            expected: generator.dim(),
            found: initial_state.len(),
        });
    }

    let operator = TransitionOperator::from_generator(generator, config.dt)?;
    let steps = step_count(horizon, config.dt, config.boundary)?;

    let mut state = RowDVector::from_row_slice(initial_state);
    let mut builder = TrajectoryBuilder::new(config.dt, &state, steps + 1);

    for step in 1..=steps {
        state = operator.apply(&state);
        tracing::trace!(step, "ctmc step");
        builder.push(&state);
    }

    let trajectory = builder.finish();
    tracing::debug!(
        states = generator.dim(),
        dt = config.dt,
        points = trajectory.len(),
        "ctmc trajectory complete"
    );
    Ok(trajectory)
}

/// [`simulate_ctmc`] with the default step of 0.01.
pub fn simulate_ctmc_default(
    horizon: f64,
    initial_state: &[f64],
    generator: &GeneratorMatrix,
) -> Result<Trajectory> {
    simulate_ctmc(horizon, initial_state, generator, &CtmcConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn example() -> GeneratorMatrix {
        GeneratorMatrix::from_rows(&[
            vec![-3.0, 1.5, 1.5],
            vec![0.0, -2.0, 2.0],
            vec![1.0, 0.5, -1.5],
        ])
        .unwrap()
    }

    fn assert_valid_distributions(trajectory: &Trajectory, tol: f64) {
        for point in trajectory.points() {
            let total: f64 = point.probabilities.iter().sum();
            assert_abs_diff_eq!(total, 1.0, epsilon = tol);
            for p in point.probabilities {
                assert!((-tol..=1.0 + tol).contains(&p), "p = {p} out of range");
            }
        }
    }

    #[test]
    fn example_run_records_102_points() {
        let trajectory = simulate_ctmc_default(1.0, &[1.0, 0.0, 0.0], &example()).unwrap();
        assert_eq!(trajectory.len(), 102);
        assert_eq!(trajectory.num_states(), 3);
        assert_valid_distributions(&trajectory, 1e-9);

        let state0 = trajectory.state(0).unwrap();
        assert_eq!(state0[0], 1.0);
        assert!(state0[1] < state0[0]);
        assert!(state0[2] < state0[1]);
        assert_abs_diff_eq!(state0[1], 0.97, epsilon = 1e-12);
    }

    #[test]
    fn overshoot_ends_one_step_past_horizon() {
        let trajectory = simulate_ctmc_default(1.0, &[1.0, 0.0, 0.0], &example()).unwrap();
        let last = *trajectory.times().last().unwrap();
        assert_abs_diff_eq!(last, 1.01, epsilon = 1e-12);
    }

    #[test]
    fn inclusive_boundary_stops_at_horizon() {
        let config = CtmcConfig {
            boundary: TimeBoundary::Inclusive,
            ..CtmcConfig::default()
        };
        let trajectory = simulate_ctmc(1.0, &[1.0, 0.0, 0.0], &example(), &config).unwrap();
        assert_eq!(trajectory.len(), 101);
        assert_abs_diff_eq!(*trajectory.times().last().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn step_counts() {
        assert_eq!(step_count(1.0, 0.01, TimeBoundary::Overshoot).unwrap(), 101);
        assert_eq!(step_count(1.0, 0.3, TimeBoundary::Overshoot).unwrap(), 4);
        assert_eq!(step_count(1.0, 0.3, TimeBoundary::Inclusive).unwrap(), 3);
        assert_eq!(step_count(0.1, 0.5, TimeBoundary::Inclusive).unwrap(), 0);
    }

    #[test]
    fn step_count_is_capped() {
        let max = MAX_TRAJECTORY_POINTS as f64;
        assert_eq!(
            step_count(max - 2.0, 1.0, TimeBoundary::Overshoot).unwrap(),
            MAX_TRAJECTORY_POINTS - 1
        );
        assert!(step_count(max - 1.0, 1.0, TimeBoundary::Overshoot).is_err());
        assert!(step_count(1e18, 0.01, TimeBoundary::Overshoot).is_err());
        assert!(step_count(f64::MAX, f64::MIN_POSITIVE, TimeBoundary::Inclusive).is_err());
    }

    #[test]
    fn huge_horizon_fails_instead_of_truncating() {
        let q = GeneratorMatrix::from_rows(&[vec![-1.0, 1.0], vec![2.0, -2.0]]).unwrap();
        let result = simulate_ctmc(1e18, &[1.0, 0.0], &q, &CtmcConfig::default());
        assert!(matches!(result, Err(SimError::InvalidArgument(_))));
    }

    #[test]
    fn approaches_stationary_distribution() {
        // Two-state chain with rates a = 1 (0 -> 1) and b = 2 (1 -> 0): pi = (2/3, 1/3).
        let q = GeneratorMatrix::from_rows(&[vec![-1.0, 1.0], vec![2.0, -2.0]]).unwrap();
        let config = CtmcConfig {
            dt: 0.001,
            ..CtmcConfig::default()
        };
        let trajectory = simulate_ctmc(20.0, &[0.0, 1.0], &q, &config).unwrap();
        let last = trajectory.final_distribution().unwrap();
        assert_abs_diff_eq!(last[0], 2.0 / 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(last[1], 1.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn absorbing_chain_is_constant() {
        let q = GeneratorMatrix::from_rows(&[vec![0.0; 3], vec![0.0; 3], vec![0.0; 3]]).unwrap();
        let config = CtmcConfig {
            dt: 0.25,
            ..CtmcConfig::default()
        };
        let initial = [0.2, 0.5, 0.3];
        let trajectory = simulate_ctmc(2.0, &initial, &q, &config).unwrap();
        for point in trajectory.points() {
            assert_eq!(point.probabilities, initial.to_vec());
        }
    }

    #[test]
    fn oversized_step_fails_before_stepping() {
        let config = CtmcConfig {
            dt: 0.5,
            ..CtmcConfig::default()
        };
        let err = simulate_ctmc(1.0, &[1.0, 0.0, 0.0], &example(), &config).unwrap_err();
        assert!(matches!(err, SimError::StepTooLarge { index: 0, .. }));
    }

    #[test]
    fn mismatched_initial_state_fails() {
        let err = simulate_ctmc_default(1.0, &[1.0, 0.0], &example()).unwrap_err();
        assert!(matches!(
            err,
            SimError::DimensionMismatch {
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn non_positive_horizon_fails() {
        assert!(simulate_ctmc_default(0.0, &[1.0, 0.0, 0.0], &example()).is_err());
        assert!(simulate_ctmc_default(f64::INFINITY, &[1.0, 0.0, 0.0], &example()).is_err());
    }

    proptest! {
        #[test]
        fn mass_is_conserved(
            a in 0.0f64..5.0,
            b in 0.0f64..5.0,
            c in 0.0f64..5.0,
            d in 0.0f64..5.0,
            start in 0usize..2,
        ) {
            let q = GeneratorMatrix::from_rows(&[
                vec![-(a + b), a, b],
                vec![c, -c, 0.0],
                vec![0.0, d, -d],
            ]).unwrap();
            let config = CtmcConfig { dt: 0.01, ..CtmcConfig::default() };
            let mut initial = [0.0; 3];
            initial[start] = 1.0;
            let trajectory = simulate_ctmc(2.0, &initial, &q, &config).unwrap();
            for point in trajectory.points() {
                let total: f64 = point.probabilities.iter().sum();
                prop_assert!((total - 1.0).abs() < 1e-9);
                prop_assert!(point.probabilities.iter().all(|&p| (-1e-12..=1.0 + 1e-12).contains(&p)));
            }
        }
    }
}
