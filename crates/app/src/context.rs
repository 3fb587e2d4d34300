//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database,
    domain::{
        carts::{
            repositories::{PgCartLinesRepository, PgCartsRepository},
            service::{CartsService, DefaultCartsService},
        },
        inventory::repository::PgStockMovementsRepository,
        orders::{
            repository::PgOrdersRepository,
            service::{DefaultOrdersService, OrdersService},
        },
        promotions::repository::PgPromotionsRepository,
        users::repository::PgUsersRepository,
    },
    payments::gateway::PaymentGateway,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL and a payment gateway.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        gateway: Arc<dyn PaymentGateway>,
        currency: String,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let users = Arc::new(PgUsersRepository::new(pool.clone()));
        let carts = Arc::new(PgCartsRepository::new(pool.clone()));
        let lines = Arc::new(PgCartLinesRepository::new(pool.clone()));
        let stock = Arc::new(PgStockMovementsRepository::new(pool.clone()));
        let promotions = Arc::new(PgPromotionsRepository::new(pool.clone()));
        let orders = Arc::new(PgOrdersRepository::new(pool.clone()));

        Ok(Self {
            auth: Arc::new(PgAuthService::new(pool)),
            carts: Arc::new(DefaultCartsService::new(carts.clone(), lines, stock)),
            orders: Arc::new(DefaultOrdersService::new(
                users, carts, promotions, orders, gateway, currency,
            )),
        })
    }
}
