//! Orders service errors.

use thiserror::Error;

use crate::payments::gateway::PaymentGatewayError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("User not found with username: '{username}'")]
    UserNotFound { username: String },

    #[error("Cart not found for the current user")]
    CartNotFound,

    #[error("Cannot identify payment method")]
    UnknownPaymentMethod,

    #[error("Cannot create PayPal transaction request: {source}")]
    Gateway {
        #[source]
        source: PaymentGatewayError,
    },

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for OrdersServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Sql(error)
    }
}
