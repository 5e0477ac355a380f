//! Database connection setup
//!
//! Production connects to the URL from [`DatabaseConfig`]; tests use [`memory`], a
//! single-connection in-memory SQLite database so every statement sees the same schema.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use simple_banking_migration::{Migrator, MigratorTrait};

use crate::config::DatabaseConfig;

#[::tracing::instrument(skip(config), fields(max_connections = config.max_connections))]
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());

    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .sqlx_logging(config.sqlx_logging);

    let db = Database::connect(options).await?;

    ::tracing::info!("Database connected");

    if config.run_migrations {
        migrate(&db).await?;
    }

    Ok(db)
}

pub async fn memory() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");

    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    Database::connect(options).await
}

pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;

    ::tracing::info!("Database migrations applied");

    Ok(())
}
