//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, Postgres, query_scalar};

use crate::auth::{errors::AuthServiceError, token::hash_token};

const FIND_USERNAME_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_username_by_token_hash.sql");

#[derive(Debug, Clone)]
pub struct PgAuthService {
    pool: PgPool,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, token: &str) -> Result<String, AuthServiceError> {
        query_scalar::<Postgres, String>(FIND_USERNAME_BY_TOKEN_HASH_SQL)
            .bind(hash_token(token))
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the username it authenticates.
    async fn authenticate_bearer(&self, token: &str) -> Result<String, AuthServiceError>;
}
