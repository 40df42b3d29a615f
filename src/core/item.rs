//! Item business logic - Handles all item-related operations.
//!
//! Prices are stored as `NUMERIC(10, 2)` and leave the crate as plain numbers.
//! The conversion happens once, in [`price_to_number`], and refuses values the
//! column could not hold rather than truncating them.

use crate::{
    core::views::{ItemSummary, ItemView},
    entities::{Item, Review, item, review},
    errors::{Error, Result},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Fractional digits of the price column.
pub const PRICE_SCALE: u32 = 2;
/// Total digits of the price column.
pub const PRICE_PRECISION: u32 = 10;

/// Converts a stored price into the number placed in a view.
///
/// # Errors
/// Returns [`Error::ValueOutOfRange`] if the price, rounded to
/// [`PRICE_SCALE`] places, needs more than [`PRICE_PRECISION`] digits or has no
/// finite `f64` representation.
pub fn price_to_number(price: Option<Decimal>) -> Result<Option<f64>> {
    let Some(price) = price else {
        return Ok(None);
    };

    let limit = Decimal::from(10_i64.pow(PRICE_PRECISION - PRICE_SCALE));
    let rounded = price.round_dp(PRICE_SCALE);
    if rounded.abs() >= limit {
        return Err(Error::ValueOutOfRange {
            value: price.to_string(),
        });
    }

    rounded
        .to_f64()
        .filter(|number| number.is_finite())
        .map(Some)
        .ok_or_else(|| Error::ValueOutOfRange {
            value: price.to_string(),
        })
}

/// Retrieves all items, ordered by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_items(db: &DatabaseConnection) -> Result<Vec<item::Model>> {
    Item::find()
        .order_by_asc(item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific item by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_item_by_id(db: &DatabaseConnection, item_id: i64) -> Result<Option<item::Model>> {
    Item::find_by_id(item_id).one(db).await.map_err(Into::into)
}

/// Creates a new item. The price is rounded to the column's scale.
///
/// # Errors
/// Returns an error if the insert fails.
#[instrument(skip(db))]
pub async fn create_item(
    db: &DatabaseConnection,
    name: Option<String>,
    price: Option<Decimal>,
) -> Result<item::Model> {
    let item = item::ActiveModel {
        name: Set(name),
        price: Set(price.map(|p| p.round_dp(PRICE_SCALE))),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(item_id = item.id, "Created item");
    Ok(item)
}

/// Replaces an item's name and price.
///
/// # Errors
/// Returns [`Error::ItemNotFound`] if no such item exists, or an error if the
/// update fails.
#[instrument(skip(db))]
pub async fn update_item(
    db: &DatabaseConnection,
    item_id: i64,
    name: Option<String>,
    price: Option<Decimal>,
) -> Result<item::Model> {
    let mut item: item::ActiveModel = Item::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })?
        .into();

    item.name = Set(name);
    item.price = Set(price.map(|p| p.round_dp(PRICE_SCALE)));
    let item = item.update(db).await?;

    info!(item_id, "Updated item");
    Ok(item)
}

/// Deletes an item. Reviews are not cascaded, see
/// [`delete_customer`](crate::core::customer::delete_customer).
///
/// # Errors
/// Returns [`Error::ItemNotFound`] if no such item exists, or an error if the
/// delete fails.
#[instrument(skip(db))]
pub async fn delete_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let result = Item::delete_by_id(item_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ItemNotFound { id: item_id });
    }

    info!(item_id, "Deleted item");
    Ok(())
}

/// Retrieves an item's reviews in attachment order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_reviews_for_item(
    db: &DatabaseConnection,
    item: &item::Model,
) -> Result<Vec<review::Model>> {
    item.find_related(Review)
        .order_by_asc(review::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Renders an item's own columns.
///
/// # Errors
/// Returns [`Error::ValueOutOfRange`] if the price cannot be rendered.
pub fn render_shallow(item: &item::Model) -> Result<ItemSummary> {
    Ok(ItemSummary {
        id: item.id,
        name: item.name.clone(),
        price: price_to_number(item.price)?,
    })
}

/// Renders an item with its reviews in shallow form.
///
/// # Errors
/// Returns [`Error::ValueOutOfRange`] if the price cannot be rendered, or an
/// error if the database query fails.
#[instrument(skip(db, item), fields(item_id = item.id))]
pub async fn render_full(db: &DatabaseConnection, item: &item::Model) -> Result<ItemView> {
    let summary = render_shallow(item)?;
    let reviews = get_reviews_for_item(db, item).await?;

    debug!(reviews = reviews.len(), "Rendered full item view");
    Ok(ItemView {
        id: summary.id,
        name: summary.name,
        price: summary.price,
        reviews: reviews
            .iter()
            .map(crate::core::review::render_shallow)
            .collect(),
    })
}
