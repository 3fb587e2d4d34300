//! Carts service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("Cart not found with id: '{id}'")]
    NotFound { id: i64 },

    #[error("Variant quantity cannot greater than variant inventory")]
    QuantityExceedsInventory,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for CartsServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Sql(error)
    }
}
