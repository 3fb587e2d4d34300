//! Cart wire models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use ampera_app::domain::carts::{
    data::UpdateQuantityType,
    models::{Cart, CartLine, CartStatus},
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub cart_id: i64,

    /// Owner username
    pub username: String,

    /// Cart lifecycle status
    pub status: CartStatusDto,

    /// The lines in the cart
    pub items: Vec<CartItemResponse>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            cart_id: cart.id,
            username: cart.username,
            status: cart.status.into(),
            items: cart.lines.into_iter().map(CartItemResponse::from).collect(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The variant in this line
    pub variant_id: i64,

    /// Units of the variant in the cart
    pub quantity: u32,

    /// Current unit price, in minor currency units
    pub unit_price: u64,

    /// The variant's parent product
    pub product_id: i64,
}

impl From<CartLine> for CartItemResponse {
    fn from(line: CartLine) -> Self {
        Self {
            variant_id: line.variant_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
            product_id: line.product_id,
        }
    }
}

/// Cart lifecycle status on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CartStatusDto {
    Active,
    CheckedOut,
}

impl From<CartStatus> for CartStatusDto {
    fn from(status: CartStatus) -> Self {
        match status {
            CartStatus::Active => Self::Active,
            CartStatus::CheckedOut => Self::CheckedOut,
        }
    }
}

impl From<CartStatusDto> for CartStatus {
    fn from(status: CartStatusDto) -> Self {
        match status {
            CartStatusDto::Active => Self::Active,
            CartStatusDto::CheckedOut => Self::CheckedOut,
        }
    }
}

/// Quantity update mode on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum UpdateTypeDto {
    Incremental,
    Override,
}

impl From<UpdateTypeDto> for UpdateQuantityType {
    fn from(update_type: UpdateTypeDto) -> Self {
        match update_type {
            UpdateTypeDto::Incremental => Self::Incremental,
            UpdateTypeDto::Override => Self::Override,
        }
    }
}
