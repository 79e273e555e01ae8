//! Fixed-step stochastic process simulators.
//!
//! Two independent steppers:
//! - [`simulate_ctmc`] integrates a continuous-time Markov chain forward by
//!   repeatedly applying `P = I + dt·Q` to a probability row vector.
//! - [`simulate_inventory`] runs Monte-Carlo replications of an (S,s)
//!   periodic-review inventory system and returns the terminal profits.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{Result, SimError};
pub use model::generator::GeneratorMatrix;
pub use model::trajectory::{Trajectory, TrajectoryPoint};
pub use simulation::config::{CtmcConfig, InventoryConfig, ScenarioFile, TimeBoundary};
pub use simulation::ctmc::{simulate_ctmc, simulate_ctmc_default};
pub use simulation::engine::{simulate_inventory, DayRecord, InventorySimulation};
pub use simulation::rng::SeedScheme;
pub use simulation::summary::ProfitSummary;
