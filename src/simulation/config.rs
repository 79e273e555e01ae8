// src/simulation/config.rs

use crate::error::Result;
use crate::simulation::rng::SeedScheme;
use serde::{Deserialize, Serialize};

/// Economic constants for the (S,s) inventory model.
///
/// Fixed for every replication of a run. Defaults reproduce the reference
/// scenario: ten days, Poisson demand with mean 50.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub horizon_days: usize,
    pub mean_demand: f64,
    /// Revenue per unit sold.
    pub price: f64,
    /// Cost per unit ordered.
    pub unit_cost: f64,
    /// Charged once per order, regardless of size.
    pub fixed_cost: f64,
    /// Per unit held, per day.
    pub storage_cost: f64,
    /// Penalty for each day with unmet demand.
    pub stockout_cost: f64,
    /// Charge holding cost on the post-demand level (before the overnight
    /// restock) instead of the level carried into the next day.
    pub charge_holding_before_restock: bool,
    pub seed_scheme: SeedScheme,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            horizon_days: 10,
            mean_demand: 50.0,
            price: 10.0,
            unit_cost: 5.0,
            fixed_cost: 10.0,
            storage_cost: 2.0,
            stockout_cost: 50.0,
            charge_holding_before_restock: true,
            seed_scheme: SeedScheme::Sequential,
        }
    }
}

impl InventoryConfig {
    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("mean_demand", self.mean_demand),
            ("price", self.price),
            ("unit_cost", self.unit_cost),
            ("fixed_cost", self.fixed_cost),
            ("storage_cost", self.storage_cost),
            ("stockout_cost", self.stockout_cost),
        ];
        for (name, value) in amounts {
            crate::ensure!(
                value.is_finite() && value >= 0.0,
                "{name} must be finite and non-negative, got {value}"
            );
        }
        Ok(())
    }
}

/// Where the CTMC trajectory stops relative to the horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBoundary {
    /// Keep stepping while the current time is within the horizon, so the
    /// last recorded point lies one step beyond it.
    #[default]
    Overshoot,
    /// Last recorded point is the final grid time not exceeding the horizon.
    Inclusive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtmcConfig {
    pub dt: f64,
    pub boundary: TimeBoundary,
}

impl Default for CtmcConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            boundary: TimeBoundary::Overshoot,
        }
    }
}

impl CtmcConfig {
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            self.dt.is_finite() && self.dt > 0.0,
            "dt must be positive and finite, got {}",
            self.dt
        );
        Ok(())
    }
}

/// Both sections of a scenario file; either may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioFile {
    pub inventory: InventoryConfig,
    pub ctmc: CtmcConfig,
}
