//! Database configuration module for the review ledger.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema, including the named foreign keys on `reviews`, always matches the
//! Rust structs.

use crate::entities::{Customer, Item, Review};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

/// Default location of the local `SQLite` file.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/review_ledger.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling
/// back to [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
///
/// When the default URL is used the `data` directory is created first.
///
/// # Errors
/// Returns an error if the directory cannot be created or the connection fails.
#[instrument]
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all("data")?;
    }

    debug!("Connecting to {}", database_url);
    let db = Database::connect(&database_url).await?;
    info!("Database connection opened");
    Ok(db)
}

/// Creates the `customers`, `items` and `reviews` tables if they do not exist.
///
/// Referenced tables are created before `reviews` so its foreign keys resolve.
///
/// # Errors
/// Returns an error if any `CREATE TABLE` statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, Customer).await?;
    create_table(db, Item).await?;
    create_table(db, Review).await?;
    info!("Database tables ensured");
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let builder = db.get_database_backend();
    let mut statement = Schema::new(builder).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}
