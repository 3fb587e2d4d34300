//! Database connection management

use sqlx::PgPool;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply the schema to the connected database. Idempotent.
///
/// # Errors
///
/// Returns an error when any schema statement fails.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;

    Ok(())
}
