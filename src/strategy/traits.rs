// src/strategy/traits.rs

use std::fmt::Debug;

/// Decides, at the end of a day, whether to order and how much.
///
/// `Send + Sync` so one policy can be shared by replication workers.
pub trait ReorderPolicy: Debug + Send + Sync {
    /// Quantity to order given the post-demand stock level.
    ///
    /// `None` means no order is placed. `Some(0)` is still an order and
    /// still pays the fixed order cost.
    fn order_quantity(&self, level: u64) -> Option<u64>;
}
