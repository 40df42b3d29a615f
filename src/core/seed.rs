//! Seeding the database from a [`SeedConfig`].
//!
//! Each table is seeded only while it is empty, so running the binary twice
//! does not duplicate rows.

use crate::{
    config::seed::SeedConfig,
    core::{customer, item, review},
    entities::{Customer, Item, Review},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Inserts the configured customers, items and reviews into empty tables.
///
/// Reviews resolve their customer and item by name against the rows present
/// after the customers and items are seeded.
///
/// # Errors
/// Returns [`Error::Config`] if a review names an unknown customer or item,
/// [`Error::ValueOutOfRange`] if a price is not a representable decimal, or an
/// error if a database operation fails.
#[instrument(skip_all)]
pub async fn seed_database(db: &DatabaseConnection, config: &SeedConfig) -> Result<()> {
    if Customer::find().count(db).await? == 0 {
        for seed in &config.customers {
            customer::create_customer(db, seed.name.clone()).await?;
        }
        info!("Seeded {} customers", config.customers.len());
    }

    if Item::find().count(db).await? == 0 {
        for seed in &config.items {
            let price = seed.price.map(to_decimal).transpose()?;
            item::create_item(db, seed.name.clone(), price).await?;
        }
        info!("Seeded {} items", config.items.len());
    }

    if Review::find().count(db).await? == 0 && !config.reviews.is_empty() {
        let customers: HashMap<String, i64> = customer::get_all_customers(db)
            .await?
            .into_iter()
            .filter_map(|c| c.name.map(|name| (name, c.id)))
            .collect();
        let items: HashMap<String, i64> = item::get_all_items(db)
            .await?
            .into_iter()
            .filter_map(|i| i.name.map(|name| (name, i.id)))
            .collect();

        for seed in &config.reviews {
            let customer_id = lookup(&customers, seed.customer.as_deref(), "customer")?;
            let item_id = lookup(&items, seed.item.as_deref(), "item")?;
            review::create_review(db, seed.comment.clone(), customer_id, item_id).await?;
        }
        info!("Seeded {} reviews", config.reviews.len());
    }

    Ok(())
}

fn to_decimal(price: f64) -> Result<Decimal> {
    Decimal::try_from(price).map_err(|_| Error::ValueOutOfRange {
        value: price.to_string(),
    })
}

fn lookup(ids: &HashMap<String, i64>, name: Option<&str>, kind: &str) -> Result<Option<i64>> {
    name.map(|name| {
        ids.get(name).copied().ok_or_else(|| Error::Config {
            message: format!("Seed review references unknown {kind} '{name}'"),
        })
    })
    .transpose()
}
