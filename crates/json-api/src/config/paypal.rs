//! PayPal Config

use clap::Args;

/// PayPal REST API settings. Secrets are never logged.
#[derive(Debug, Args)]
pub struct PayPalSettings {
    /// PayPal API base URL
    #[arg(
        long,
        env = "PAYPAL_BASE_URL",
        default_value = "https://api-m.sandbox.paypal.com"
    )]
    pub paypal_base_url: String,

    /// PayPal REST application client id
    #[arg(long, env = "PAYPAL_CLIENT_ID")]
    pub paypal_client_id: String,

    /// PayPal REST application client secret
    #[arg(long, env = "PAYPAL_CLIENT_SECRET")]
    pub paypal_client_secret: String,

    /// Buyer redirect after approving the payment
    #[arg(long, env = "PAYPAL_RETURN_URL")]
    pub paypal_return_url: String,

    /// Buyer redirect after cancelling checkout
    #[arg(long, env = "PAYPAL_CANCEL_URL")]
    pub paypal_cancel_url: String,

    /// ISO 4217 currency code for order totals
    #[arg(long, env = "CURRENCY", default_value = "VND")]
    pub currency: String,
}
