//! Stock Movements Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::inventory::models::{MovementDirection, MovementStatus, StockMovement};

const MOVEMENTS_FOR_VARIANT_SQL: &str = include_str!("sql/movements_for_variant.sql");

#[derive(Debug, Clone)]
pub struct PgStockMovementsRepository {
    pool: PgPool,
}

impl PgStockMovementsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockMovementsRepository for PgStockMovementsRepository {
    async fn movements_for_variant(
        &self,
        variant_id: i64,
    ) -> Result<Vec<StockMovement>, sqlx::Error> {
        query_as::<Postgres, StockMovement>(MOVEMENTS_FOR_VARIANT_SQL)
            .bind(variant_id)
            .fetch_all(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StockMovement {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let direction: String = row.try_get("direction")?;
        let status: String = row.try_get("status")?;

        Ok(Self {
            variant_id: row.try_get("variant_id")?,
            direction: MovementDirection::parse(&direction).ok_or_else(|| {
                sqlx::Error::ColumnDecode {
                    index: "direction".to_string(),
                    source: format!("unknown movement direction '{direction}'").into(),
                }
            })?,
            status: MovementStatus::parse(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: format!("unknown movement status '{status}'").into(),
            })?,
            quantity: try_get_quantity(row, "quantity")?,
        })
    }
}

pub(crate) fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i32: i32 = row.try_get(col)?;

    u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

#[automock]
#[async_trait]
pub trait StockMovementsRepository: Send + Sync {
    /// All recorded stock movements for a variant, in any order.
    async fn movements_for_variant(
        &self,
        variant_id: i64,
    ) -> Result<Vec<StockMovement>, sqlx::Error>;
}
