//! PostgreSQL pool construction and schema migrations

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

#[derive(Error, Debug)]
pub enum DatabaseInitError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_idle.unwrap_or(0))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .max_lifetime(config.max_lifetime_seconds.map(Duration::from_secs))
        .idle_timeout(config.idle_timeout_seconds.map(Duration::from_secs))
        .test_before_acquire(config.enable_health_checks)
}

/// Connect a pool and apply pending migrations when enabled
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseInitError> {
    tracing::info!(
        max_connections = config.max_connections,
        "Initializing PostgreSQL database pool"
    );
    let pool = pool_options(config).connect(&config.url).await?;

    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    Ok(pool)
}

/// Pool that connects on first use
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseInitError> {
    Ok(pool_options(config).connect_lazy(&config.url)?)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), DatabaseInitError> {
    tracing::info!("Running database migrations");
    sqlx::migrate!("../migrations").run(pool).await?;
    Ok(())
}

/// Round-trip a trivial query to confirm the database is reachable
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}
