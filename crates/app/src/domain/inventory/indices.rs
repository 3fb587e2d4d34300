//! Inventory index computation.

use crate::domain::inventory::models::{MovementDirection, MovementStatus, StockMovement};

/// Aggregated stock counters for a single variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryIndices {
    /// Units physically in stock (completed inbound minus completed outbound).
    pub on_hand: i64,

    /// Units on open inbound movements, not yet received.
    pub incoming: i64,

    /// Units reserved by open outbound movements.
    pub reserved: i64,
}

impl InventoryIndices {
    /// Units currently available for purchase.
    #[must_use]
    pub fn sellable(&self) -> i64 {
        self.on_hand - self.reserved
    }
}

/// Fold a variant's stock movements into its inventory indices.
///
/// Cancelled movements never count. An empty movement list yields all-zero
/// indices, so a variant with no recorded movements is not sellable.
#[must_use]
pub fn indices(movements: &[StockMovement]) -> InventoryIndices {
    let mut indices = InventoryIndices::default();

    for movement in movements {
        let quantity = i64::from(movement.quantity);

        match (movement.direction, movement.status) {
            (_, MovementStatus::Cancelled) => {}
            (MovementDirection::Inbound, MovementStatus::Completed) => {
                indices.on_hand += quantity;
            }
            (MovementDirection::Outbound, MovementStatus::Completed) => {
                indices.on_hand -= quantity;
            }
            (
                MovementDirection::Inbound,
                MovementStatus::Pending | MovementStatus::InTransit,
            ) => {
                indices.incoming += quantity;
            }
            (
                MovementDirection::Outbound,
                MovementStatus::Pending | MovementStatus::InTransit,
            ) => {
                indices.reserved += quantity;
            }
        }
    }

    indices
}
