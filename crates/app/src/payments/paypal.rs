//! PayPal checkout-orders client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::payments::gateway::{
    CheckoutRequest, CheckoutSession, PaymentGateway, PaymentGatewayError,
};

/// Configuration for connecting to the PayPal REST API.
#[derive(Debug, Clone)]
pub struct PayPalConfig {
    /// API base, e.g. `"https://api-m.sandbox.paypal.com"`.
    pub base_url: String,

    /// REST application client id.
    pub client_id: String,

    /// REST application client secret.
    pub client_secret: String,

    /// Where the buyer lands after approving the payment.
    pub return_url: String,

    /// Where the buyer lands after cancelling.
    pub cancel_url: String,
}

/// HTTP client for the PayPal v2 checkout-orders API.
#[derive(Debug, Clone)]
pub struct PayPalClient {
    config: PayPalConfig,
    http: Client,
}

impl PayPalClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: PayPalConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Obtain an OAuth2 access token via the client-credentials grant.
    async fn access_token(&self) -> Result<String, PaymentGatewayError> {
        let url = format!("{}/v1/oauth2/token", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentGatewayError::UnexpectedResponse(format!(
                "token request failed with status {status}: {text}"
            )));
        }

        let parsed: AccessTokenResponse = response.json().await?;

        Ok(parsed.access_token)
    }
}

#[async_trait]
impl PaymentGateway for PayPalClient {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentGatewayError> {
        let token = self.access_token().await?;
        let url = format!("{}/v2/checkout/orders", self.config.base_url);

        let body = serde_json::json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "reference_id": request.reference,
                "amount": {
                    "currency_code": request.currency,
                    "value": request.amount.to_string(),
                },
            }],
            "application_context": {
                "return_url": self.config.return_url,
                "cancel_url": self.config.cancel_url,
            },
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentGatewayError::UnexpectedResponse(format!(
                "create order request failed with status {status}: {text}"
            )));
        }

        let session: CheckoutSession = response.json().await?;

        Ok(session)
    }
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

#[cfg(test)]
mod tests {
    use crate::payments::gateway::CheckoutSession;

    #[test]
    fn checkout_session_deserializes_the_gateway_wire_shape() {
        let body = r#"{
            "id": "5O190127TN364715T",
            "status": "CREATED",
            "links": [
                {"href": "https://api-m.sandbox.paypal.com/v2/checkout/orders/5O190127TN364715T", "rel": "self", "method": "GET"},
                {"href": "https://www.sandbox.paypal.com/checkoutnow?token=5O190127TN364715T", "rel": "approve", "method": "GET"},
                {"href": "https://api-m.sandbox.paypal.com/v2/checkout/orders/5O190127TN364715T/capture", "rel": "capture", "method": "POST"}
            ]
        }"#;

        let session: CheckoutSession =
            serde_json::from_str(body).expect("session should deserialize");

        assert_eq!(session.id, "5O190127TN364715T");
        assert_eq!(session.status, "CREATED");
        assert_eq!(session.links.len(), 3);
        assert_eq!(
            session.approve_link(),
            Some("https://www.sandbox.paypal.com/checkoutnow?token=5O190127TN364715T")
        );
    }

    #[test]
    fn links_default_to_empty_when_missing() {
        let session: CheckoutSession =
            serde_json::from_str(r#"{"id": "x", "status": "CREATED"}"#)
                .expect("session should deserialize");

        assert!(session.links.is_empty());
        assert_eq!(session.approve_link(), None);
    }
}
