use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    connect_url(&config.database_url).await
}

/// Opens a pool for `url`. In-memory SQLite databases live per connection,
/// so those pools are pinned to a single connection.
pub async fn connect_url(url: &str) -> AppResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(url.to_string());
    options.sqlx_logging(false);
    if url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    Database::connect(options)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to connect to database: {}", e)))
}

/// Applies every pending schema migration, including the demo seed data.
pub async fn migrate(db: &DatabaseConnection) -> AppResult<()> {
    migration::Migrator::up(db, None).await?;
    Ok(())
}
