//! Promotion Models

use jiff::Timestamp;

/// A percentage discount active for a product within a validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub id: i64,
    pub name: String,
    pub percent: u32,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}
