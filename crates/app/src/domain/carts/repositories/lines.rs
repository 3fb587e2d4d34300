//! Cart Lines Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, query};

use crate::domain::carts::models::CartLineKey;

const DELETE_CART_LINES_SQL: &str = include_str!("../sql/delete_cart_lines.sql");

#[derive(Debug, Clone)]
pub struct PgCartLinesRepository {
    pool: PgPool,
}

impl PgCartLinesRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartLinesRepository for PgCartLinesRepository {
    async fn delete_by_keys(&self, keys: Vec<CartLineKey>) -> Result<u64, sqlx::Error> {
        let cart_ids: Vec<i64> = keys.iter().map(|key| key.cart_id).collect();
        let variant_ids: Vec<i64> = keys.iter().map(|key| key.variant_id).collect();

        let rows_affected = query(DELETE_CART_LINES_SQL)
            .bind(cart_ids)
            .bind(variant_ids)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

#[automock]
#[async_trait]
pub trait CartLinesRepository: Send + Sync {
    /// Delete every line matching one of the given composite keys in a single
    /// batch. An empty key list is a valid no-op.
    async fn delete_by_keys(&self, keys: Vec<CartLineKey>) -> Result<u64, sqlx::Error>;
}
