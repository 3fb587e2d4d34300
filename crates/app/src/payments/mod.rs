//! Payment gateway integration

pub mod gateway;
pub mod paypal;

pub use gateway::*;
pub use paypal::{PayPalClient, PayPalConfig};
