//! Users Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::users::models::{Address, User};

const FIND_USER_BY_USERNAME_SQL: &str = include_str!("sql/find_user_by_username.sql");

#[derive(Debug, Clone)]
pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(FIND_USER_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            fullname: row.try_get("fullname")?,
            phone: row.try_get("phone")?,
            address: Address {
                line: row.try_get("line")?,
                ward: row.try_get("ward")?,
                district: row.try_get("district")?,
                province: row.try_get("province")?,
            },
        })
    }
}

#[automock]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Look up a user by username, including the shipping address.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;
}
