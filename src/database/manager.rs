use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors raised by the store layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Build the shared connection pool. Called once at startup; the pool is then
/// handed to the store adapter.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    if config.url.trim().is_empty() {
        return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect(&config.url)
        .await?;

    info!(
        "Created database pool (max_connections={}, acquire_timeout={}s)",
        config.max_connections, config.connection_timeout
    );
    Ok(pool)
}
