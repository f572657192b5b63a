pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// True when the report wraps a Postgres unique-constraint violation
/// (SQLSTATE 23505). The boundary layer maps these to a 400 duplicate
/// response instead of a 500.
pub fn is_unique_violation(report: &eyre::Report) -> bool {
    report
        .downcast_ref::<sqlx::Error>()
        .and_then(|err| err.as_database_error())
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == "23505")
}
