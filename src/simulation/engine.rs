// src/simulation/engine.rs

use crate::error::Result;
use crate::model::demand::DemandDistribution;
use crate::model::inventory::InventoryPosition;
use crate::simulation::config::InventoryConfig;
use crate::simulation::rng::{master_rng, replication_rng, resolve_master_seed, SeedScheme};
use crate::strategy::implementations::OrderUpToPolicy;
use crate::strategy::traits::ReorderPolicy;
use rand::Rng;
use rand_distr::Distribution;
use serde::Serialize;

/// Upper bound on rows reserved up front for the daily log.
const HISTORY_PREALLOC_LIMIT: usize = 1 << 20;

// Serialize so the daily log can go straight to CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    pub replication: usize,
    pub day: usize,
    pub demand: u64,
    pub sold: u64,
    pub stockout: bool,
    /// Empty when no order was placed.
    pub order_quantity: Option<u64>,
    /// Level carried into the next day.
    pub closing_inventory: u64,
    pub revenue: f64,
    pub order_cost: f64,
    pub holding_cost: f64,
    pub stockout_penalty: f64,
    /// Replication profit so far, this day included.
    pub profit: f64,
}

/// Terminal profits plus the day-by-day log that produced them.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub profits: Vec<f64>,
    pub history: Vec<DayRecord>,
}

/// Monte-Carlo runner for one (S,s) scenario.
#[derive(Debug)]
pub struct InventorySimulation {
    config: InventoryConfig,
    demand: DemandDistribution,
    capacity: u64,
    policy: Box<dyn ReorderPolicy>,
}

impl InventorySimulation {
    /// Validates the bounds and economic constants up front; a constructed
    /// simulation cannot fail mid-run.
    pub fn new(config: InventoryConfig, capacity: i64, reorder_level: i64) -> Result<Self> {
        crate::ensure!(capacity >= 0, "capacity must be non-negative, got {capacity}");
        crate::ensure!(
            reorder_level >= 0,
            "reorder level must be non-negative, got {reorder_level}"
        );
        config.validate()?;

        let capacity = capacity as u64;
        let policy = OrderUpToPolicy::new(capacity, reorder_level as u64);
        Ok(Self::with_policy(
            config.clone(),
            DemandDistribution::poisson(config.mean_demand)?,
            capacity,
            Box::new(policy),
        ))
    }

    /// Builds a simulation around any reorder rule.
    pub fn with_policy(
        config: InventoryConfig,
        demand: DemandDistribution,
        capacity: u64,
        policy: Box<dyn ReorderPolicy>,
    ) -> Self {
        Self {
            config,
            demand,
            capacity,
            policy,
        }
    }

    /// Terminal profit of each of `reps` replications, in replication order.
    pub fn run(&self, reps: usize, seed: Option<u64>) -> Result<Vec<f64>> {
        let mut profits = Vec::with_capacity(reps);
        self.run_inner(reps, seed, |profit| profits.push(profit), None)?;
        Ok(profits)
    }

    /// Like [`run`](Self::run), also returning every simulated day.
    pub fn run_with_history(&self, reps: usize, seed: Option<u64>) -> Result<SimulationOutput> {
        let mut profits = Vec::with_capacity(reps);
        let mut history = Vec::with_capacity(
            reps.saturating_mul(self.config.horizon_days)
                .min(HISTORY_PREALLOC_LIMIT),
        );
        self.run_inner(
            reps,
            seed,
            |profit| profits.push(profit),
            Some(&mut history),
        )?;
        Ok(SimulationOutput { profits, history })
    }

    fn run_inner<F>(
        &self,
        reps: usize,
        seed: Option<u64>,
        mut on_profit: F,
        mut history: Option<&mut Vec<DayRecord>>,
    ) -> Result<()>
    where
        F: FnMut(f64),
    {
        crate::ensure!(reps >= 1, "replication count must be at least 1, got {reps}");

        match self.config.seed_scheme {
            SeedScheme::Sequential => {
                let mut rng = master_rng(seed);
                for rep in 0..reps {
                    let profit = self.replicate(rep, &mut rng, history.as_deref_mut());
                    on_profit(profit);
                }
            }
            SeedScheme::PerReplication => {
                let master = resolve_master_seed(seed);
                for rep in 0..reps {
                    let mut rng = replication_rng(master, rep as u64);
                    let profit = self.replicate(rep, &mut rng, history.as_deref_mut());
                    on_profit(profit);
                }
            }
        }
        Ok(())
    }

    /// One pass over the horizon starting from a full stock.
    pub fn replicate<R: Rng + ?Sized>(
        &self,
        replication: usize,
        rng: &mut R,
        mut history: Option<&mut Vec<DayRecord>>,
    ) -> f64 {
        let mut inventory = InventoryPosition::new(self.capacity);
        let mut profit = 0.0;

        for day in 1..=self.config.horizon_days {
            let record = self.step(replication, day, &mut inventory, profit, rng);
            profit = record.profit;
            if let Some(log) = history.as_deref_mut() {
                log.push(record);
            }
        }

        tracing::debug!(replication, profit, "replication complete");
        profit
    }

    fn step<R: Rng + ?Sized>(
        &self,
        replication: usize,
        day: usize,
        inventory: &mut InventoryPosition,
        profit_so_far: f64,
        rng: &mut R,
    ) -> DayRecord {
        let c = &self.config;

        // =================================================================
        // DAY: demand arrives and is served from stock
        // =================================================================
        let demand = self.demand.sample(rng);
        let sale = inventory.fulfil(demand);
        let revenue = sale.sold as f64 * c.price;
        let post_demand_level = inventory.level;

        // =================================================================
        // EVENING: reorder decision, delivery lands overnight
        // =================================================================
        let order_quantity = self.policy.order_quantity(post_demand_level);
        let order_cost = match order_quantity {
            Some(quantity) => {
                inventory.restock(quantity);
                c.fixed_cost + quantity as f64 * c.unit_cost
            }
            None => 0.0,
        };

        let held = if c.charge_holding_before_restock {
            post_demand_level
        } else {
            inventory.level
        };
        let holding_cost = c.storage_cost * held as f64;
        let stockout_penalty = if sale.stockout { c.stockout_cost } else { 0.0 };

        let profit = profit_so_far + revenue - order_cost - holding_cost - stockout_penalty;

        DayRecord {
            replication,
            day,
            demand,
            sold: sale.sold,
            stockout: sale.stockout,
            order_quantity,
            closing_inventory: inventory.level,
            revenue,
            order_cost,
            holding_cost,
            stockout_penalty,
            profit,
        }
    }
}

/// Runs `reps` replications of the (S,s) model and returns their profits.
pub fn simulate_inventory(
    config: &InventoryConfig,
    capacity: i64,
    reorder_level: i64,
    reps: usize,
    seed: Option<u64>,
) -> Result<Vec<f64>> {
    InventorySimulation::new(config.clone(), capacity, reorder_level)?.run(reps, seed)
}
