//! Inventory

pub mod indices;
pub mod models;
pub mod repository;

pub use indices::*;
pub use repository::*;
