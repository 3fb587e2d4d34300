//! Order Data

use crate::domain::orders::models::{OrderStatus, PaymentMethod};

/// A place-order request. The payment method is optional on the wire and
/// validated by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOrder {
    pub payment_method: Option<PaymentMethod>,
}

/// A new order to persist, with its line snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub code: String,
    pub username: String,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub total: u64,
    pub gateway_order_id: Option<String>,
    pub lines: Vec<NewOrderLine>,
}

/// Snapshot of one cart line at order time, with its discounted subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub variant_id: i64,
    pub quantity: u32,
    pub unit_price: u64,
    pub subtotal: u64,
}

/// The outcome of a successful order placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub code: String,
    pub total: u64,
    pub payment_method: PaymentMethod,
    /// Gateway approval URL; `None` for cash orders.
    pub checkout_url: Option<String>,
}
