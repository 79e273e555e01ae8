// src/strategy/implementations.rs

use crate::strategy::traits::ReorderPolicy;

/// The (S,s) rule: once stock is at or below `reorder_level` (s), order
/// enough to bring it back up to `capacity` (S).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderUpToPolicy {
    capacity: u64,
    reorder_level: u64,
}

impl OrderUpToPolicy {
    pub fn new(capacity: u64, reorder_level: u64) -> Self {
        Self {
            capacity,
            reorder_level,
        }
    }
}

impl ReorderPolicy for OrderUpToPolicy {
    fn order_quantity(&self, level: u64) -> Option<u64> {
        if level <= self.reorder_level {
            Some(self.capacity.saturating_sub(level))
        } else {
            None
        }
    }
}
