//! Cart Data

use crate::domain::carts::models::CartStatus;

/// A save-cart request: create when `cart_id` is absent, merge-update when
/// present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveCart {
    pub cart_id: Option<i64>,
    pub username: String,
    pub status: CartStatus,
    pub update_type: UpdateQuantityType,
    pub lines: Vec<CartLineChange>,
}

/// Requested quantity for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLineChange {
    pub variant_id: i64,
    pub quantity: u32,
}

/// How a requested quantity combines with an existing line's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateQuantityType {
    /// Add the requested quantity to the existing one.
    Incremental,
    /// Replace the existing quantity with the requested one.
    Override,
}

/// The merged cart state to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartDraft {
    pub id: Option<i64>,
    pub username: String,
    pub status: CartStatus,
    pub lines: Vec<CartLineDraft>,
}

/// One line of a cart draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLineDraft {
    pub variant_id: i64,
    pub quantity: u32,
}
