//! Carts Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    carts::{
        data::CartDraft,
        models::{Cart, CartLine, CartStatus},
    },
    inventory::repository::try_get_quantity,
};

const GET_CART_BY_USERNAME_SQL: &str = include_str!("../sql/get_cart_by_username.sql");
const GET_CART_BY_ID_SQL: &str = include_str!("../sql/get_cart_by_id.sql");
const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");
const INSERT_CART_SQL: &str = include_str!("../sql/insert_cart.sql");
const UPDATE_CART_SQL: &str = include_str!("../sql/update_cart.sql");
const UPSERT_CART_LINE_SQL: &str = include_str!("../sql/upsert_cart_line.sql");
const SET_CART_STATUS_SQL: &str = include_str!("../sql/set_cart_status.sql");

#[derive(Debug, Clone)]
pub struct PgCartsRepository {
    pool: PgPool,
}

impl PgCartsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_lines(
        tx: &mut Transaction<'_, Postgres>,
        cart_id: i64,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(GET_CART_LINES_SQL)
            .bind(cart_id)
            .fetch_all(&mut **tx)
            .await
    }

    async fn load_cart(
        tx: &mut Transaction<'_, Postgres>,
        sql: &str,
        bind: CartLookup<'_>,
    ) -> Result<Option<Cart>, sqlx::Error> {
        let query = query_as::<Postgres, Cart>(sql);

        let head = match bind {
            CartLookup::Username(username) => query.bind(username.to_string()),
            CartLookup::Id(id) => query.bind(id),
        }
        .fetch_optional(&mut **tx)
        .await?;

        let Some(mut cart) = head else {
            return Ok(None);
        };

        cart.lines = Self::load_lines(tx, cart.id).await?;

        Ok(Some(cart))
    }
}

enum CartLookup<'a> {
    Username(&'a str),
    Id(i64),
}

#[async_trait]
impl CartsRepository for PgCartsRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Cart>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let cart = Self::load_cart(&mut tx, GET_CART_BY_USERNAME_SQL, CartLookup::Username(username))
            .await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Cart>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let cart = Self::load_cart(&mut tx, GET_CART_BY_ID_SQL, CartLookup::Id(id)).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn save(&self, draft: CartDraft) -> Result<Cart, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let cart_id = match draft.id {
            Some(id) => {
                query(UPDATE_CART_SQL)
                    .bind(id)
                    .bind(&draft.username)
                    .bind(draft.status.as_i16())
                    .execute(&mut *tx)
                    .await?;

                id
            }
            None => {
                query_scalar::<Postgres, i64>(INSERT_CART_SQL)
                    .bind(&draft.username)
                    .bind(draft.status.as_i16())
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        for line in &draft.lines {
            query(UPSERT_CART_LINE_SQL)
                .bind(cart_id)
                .bind(line.variant_id)
                .bind(i64::from(line.quantity))
                .execute(&mut *tx)
                .await?;
        }

        let saved = Self::load_cart(&mut tx, GET_CART_BY_ID_SQL, CartLookup::Id(cart_id))
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;

        Ok(saved)
    }

    async fn set_status(&self, id: i64, status: CartStatus) -> Result<(), sqlx::Error> {
        query(SET_CART_STATUS_SQL)
            .bind(id)
            .bind(status.as_i16())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: i16 = row.try_get("status")?;

        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            status: CartStatus::parse(status).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: format!("unknown cart status {status}").into(),
            })?,
            lines: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let unit_price: i64 = row.try_get("unit_price")?;

        Ok(Self {
            variant_id: row.try_get("variant_id")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: u64::try_from(unit_price).map_err(|e| sqlx::Error::ColumnDecode {
                index: "unit_price".to_string(),
                source: Box::new(e),
            })?,
            product_id: row.try_get("product_id")?,
        })
    }
}

#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// The owner's current active cart, if any.
    async fn find_by_username(&self, username: &str) -> Result<Option<Cart>, sqlx::Error>;

    /// A cart by primary key.
    async fn find_by_id(&self, id: i64) -> Result<Option<Cart>, sqlx::Error>;

    /// Upsert a cart and its lines, returning the persisted snapshot.
    async fn save(&self, draft: CartDraft) -> Result<Cart, sqlx::Error>;

    /// Transition a cart's status.
    async fn set_status(&self, id: i64, status: CartStatus) -> Result<(), sqlx::Error>;
}
