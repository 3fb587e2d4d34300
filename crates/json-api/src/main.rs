//! Ampera JSON API Server

use std::{process, sync::Arc};

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use ampera_app::{
    context::AppContext,
    payments::{PayPalClient, PayPalConfig},
};

use crate::{config::ServerConfig, state::State};

mod auth;
mod carts;
mod config;
mod extensions;
mod healthcheck;
mod logging;
mod orders;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Ampera JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        // Logging is not initialized yet; stderr is all we have.
        eprintln!("Configuration error: {e}");

        process::exit(1);
    });

    if let Err(init_error) = logging::init_subscriber(&config.logging) {
        eprintln!("Failed to initialize logging: {init_error}");

        process::exit(1);
    }

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let gateway = Arc::new(PayPalClient::new(PayPalConfig {
        base_url: config.paypal.paypal_base_url,
        client_id: config.paypal.paypal_client_id,
        client_secret: config.paypal.paypal_client_secret,
        return_url: config.paypal.paypal_return_url,
        cancel_url: config.paypal.paypal_cancel_url,
    }));

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        gateway,
        config.paypal.currency,
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(router::client_api_router());

    let doc = OpenApi::new("Ampera API", "0.3.0")
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
