//! Payment gateway contract.

use async_trait::async_trait;
use mockall::automock;
use serde::Deserialize;
use thiserror::Error;

/// A request to open a checkout transaction for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Merchant-side order reference (the order code).
    pub reference: String,

    /// Total amount in minor units of `currency`.
    pub amount: u64,

    /// ISO 4217 currency code.
    pub currency: String,
}

/// A checkout transaction created at the gateway.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub links: Vec<CheckoutLink>,
}

/// A gateway hyperlink, keyed by relation name.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CheckoutLink {
    pub href: String,
    pub rel: String,
    #[serde(default)]
    pub method: Option<String>,
}

impl CheckoutSession {
    /// The buyer-facing approval URL, if the gateway provided one.
    #[must_use]
    pub fn approve_link(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == "approve")
            .map(|link| link.href.as_str())
    }
}

/// Errors that can occur when talking to the payment gateway.
#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned a non-2xx response or unexpected body.
    #[error("unexpected response from payment gateway: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a checkout transaction for the given order.
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentGatewayError>;
}
