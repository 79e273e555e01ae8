// src/model/inventory.rs

/// Outcome of serving one day's demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sale {
    pub sold: u64,
    /// Demand exceeded the stock on hand.
    pub stockout: bool,
}

/// On-hand stock of a single replication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryPosition {
    pub level: u64,
}

impl InventoryPosition {
    /// A replication starts full.
    pub fn new(capacity: u64) -> Self {
        Self { level: capacity }
    }

    /// Sell what we can. Unmet demand is lost, never backordered, so the
    /// level bottoms out at zero.
    pub fn fulfil(&mut self, demand: u64) -> Sale {
        let stockout = demand > self.level;
        let sold = demand.min(self.level);
        self.level -= sold;
        Sale { sold, stockout }
    }

    /// Overnight delivery of `quantity` units.
    pub fn restock(&mut self, quantity: u64) {
        self.level += quantity;
    }
}
