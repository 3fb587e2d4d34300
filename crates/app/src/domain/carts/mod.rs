//! Carts

pub mod data;
pub mod errors;
pub mod merge;
pub mod models;
pub mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use repositories::*;
pub use service::*;
