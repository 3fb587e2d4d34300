//! Orders Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::orders::{
    data::NewOrder,
    models::{Order, OrderStatus, PaymentMethod},
};

const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const INSERT_ORDER_LINE_SQL: &str = include_str!("sql/insert_order_line.sql");

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    pool: PgPool,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn save(&self, order: NewOrder) -> Result<Order, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let saved = query_as::<Postgres, Order>(INSERT_ORDER_SQL)
            .bind(&order.code)
            .bind(&order.username)
            .bind(order.status.as_str())
            .bind(order.payment_method.as_str())
            .bind(i64::try_from(order.total).map_err(|e| sqlx::Error::Encode(Box::new(e)))?)
            .bind(&order.gateway_order_id)
            .fetch_one(&mut *tx)
            .await?;

        for line in &order.lines {
            query(INSERT_ORDER_LINE_SQL)
                .bind(saved.id)
                .bind(line.variant_id)
                .bind(i64::from(line.quantity))
                .bind(i64::try_from(line.unit_price).map_err(|e| sqlx::Error::Encode(Box::new(e)))?)
                .bind(i64::try_from(line.subtotal).map_err(|e| sqlx::Error::Encode(Box::new(e)))?)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(saved)
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let payment_method: String = row.try_get("payment_method")?;
        let total: i64 = row.try_get("total")?;

        Ok(Self {
            id: row.try_get("id")?,
            code: row.try_get("code")?,
            username: row.try_get("username")?,
            status: OrderStatus::parse(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: format!("unknown order status '{status}'").into(),
            })?,
            payment_method: PaymentMethod::parse(&payment_method).ok_or_else(|| {
                sqlx::Error::ColumnDecode {
                    index: "payment_method".to_string(),
                    source: format!("unknown payment method '{payment_method}'").into(),
                }
            })?,
            total: u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
                index: "total".to_string(),
                source: Box::new(e),
            })?,
            gateway_order_id: row.try_get("gateway_order_id")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Persist an order and its line snapshot in one transaction.
    async fn save(&self, order: NewOrder) -> Result<Order, sqlx::Error>;
}
