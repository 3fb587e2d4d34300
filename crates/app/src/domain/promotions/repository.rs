//! Promotions Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::promotions::models::Promotion;

const ACTIVE_PROMOTIONS_FOR_PRODUCT_SQL: &str =
    include_str!("sql/active_promotions_for_product.sql");

#[derive(Debug, Clone)]
pub struct PgPromotionsRepository {
    pool: PgPool,
}

impl PgPromotionsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromotionsRepository for PgPromotionsRepository {
    async fn active_for_product(
        &self,
        product_id: i64,
        at: Timestamp,
    ) -> Result<Vec<Promotion>, sqlx::Error> {
        query_as::<Postgres, Promotion>(ACTIVE_PROMOTIONS_FOR_PRODUCT_SQL)
            .bind(product_id)
            .bind(SqlxTimestamp::from(at))
            .fetch_all(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Promotion {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let percent: i32 = row.try_get("percent")?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            percent: u32::try_from(percent).map_err(|e| sqlx::Error::ColumnDecode {
                index: "percent".to_string(),
                source: Box::new(e),
            })?,
            starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
            ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
        })
    }
}

#[automock]
#[async_trait]
pub trait PromotionsRepository: Send + Sync {
    /// Promotions active for the product at the given instant, highest
    /// percent first.
    async fn active_for_product(
        &self,
        product_id: i64,
        at: Timestamp,
    ) -> Result<Vec<Promotion>, sqlx::Error>;
}
