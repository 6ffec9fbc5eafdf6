//! Database migration command.
//!
//! Connects using the same configuration the API reads (`DATABASE_URL`
//! or the `POSTGRES_*` parts) and applies the migrations embedded from
//! `crates/api/migrations/`.

use thiserror::Error;

use wordsmith_api::config::{AppConfig, ConfigError};
use wordsmith_api::db;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run account database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if configuration is invalid, the database is
/// unreachable, or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    tracing::info!("Connecting to account database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running account migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Account migrations complete!");
    Ok(())
}
