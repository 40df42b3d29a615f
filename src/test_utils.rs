//! Shared test utilities for the review ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{customer, item, review},
    entities,
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test customer with the given name.
pub async fn create_test_customer(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::customer::Model> {
    customer::create_customer(db, Some(name.to_string())).await
}

/// Creates a test item with sensible defaults.
///
/// # Defaults
/// * price: 10.00
pub async fn create_test_item(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::item::Model> {
    item::create_item(db, Some(name.to_string()), Some(Decimal::new(1000, 2))).await
}

/// Creates a test item with custom name and price.
pub async fn create_custom_item(
    db: &DatabaseConnection,
    name: Option<&str>,
    price: Option<Decimal>,
) -> Result<entities::item::Model> {
    item::create_item(db, name.map(str::to_string), price).await
}

/// Sets up a complete test environment with one customer, one item and a
/// review linking them.
/// Returns (db, customer, item, review) for relation tests.
pub async fn setup_with_review() -> Result<(
    DatabaseConnection,
    entities::customer::Model,
    entities::item::Model,
    entities::review::Model,
)> {
    let db = setup_test_db().await?;
    let customer = create_test_customer(&db, "Test Customer").await?;
    let item = create_test_item(&db, "Test Item").await?;
    let review = review::create_review(
        &db,
        Some("Test review".to_string()),
        Some(customer.id),
        Some(item.id),
    )
    .await?;
    Ok((db, customer, item, review))
}
