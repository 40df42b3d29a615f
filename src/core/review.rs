//! Review business logic - repository operations, reference resolution and rendering.
//!
//! A review is the join between one customer and one item. Either side may be
//! absent (null foreign key). A non-null key whose row is gone is reported as
//! [`Error::DanglingReference`] so it is never confused with an absent link.

use crate::{
    core::views::{ReviewSummary, ReviewView},
    entities::{self, Customer, Item, Review, review},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument, warn};

/// Retrieves every review, in attachment (id) order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_reviews(db: &DatabaseConnection) -> Result<Vec<review::Model>> {
    Review::find()
        .order_by_asc(review::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific review by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_review_by_id(
    db: &DatabaseConnection,
    review_id: i64,
) -> Result<Option<review::Model>> {
    Review::find_by_id(review_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a review linking a customer and an item.
///
/// Either key may be `None`. A key naming a row that does not exist is
/// rejected by the foreign-key constraint and surfaces as [`Error::Database`].
///
/// # Errors
/// Returns an error if the insert fails.
#[instrument(skip(db, comment))]
pub async fn create_review(
    db: &DatabaseConnection,
    comment: Option<String>,
    customer_id: Option<i64>,
    item_id: Option<i64>,
) -> Result<review::Model> {
    let review = review::ActiveModel {
        comment: Set(comment),
        customer_id: Set(customer_id),
        item_id: Set(item_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(review_id = review.id, "Created review");
    Ok(review)
}

/// Replaces the comment of an existing review.
///
/// # Errors
/// Returns [`Error::ReviewNotFound`] if no such review exists, or an error if
/// the update fails.
#[instrument(skip(db, comment))]
pub async fn update_review_comment(
    db: &DatabaseConnection,
    review_id: i64,
    comment: Option<String>,
) -> Result<review::Model> {
    let mut review: review::ActiveModel = Review::find_by_id(review_id)
        .one(db)
        .await?
        .ok_or(Error::ReviewNotFound { id: review_id })?
        .into();

    review.comment = Set(comment);
    let review = review.update(db).await?;

    info!(review_id, "Updated review comment");
    Ok(review)
}

/// Deletes a review.
///
/// # Errors
/// Returns [`Error::ReviewNotFound`] if no such review exists, or an error if
/// the delete fails.
#[instrument(skip(db))]
pub async fn delete_review(db: &DatabaseConnection, review_id: i64) -> Result<()> {
    let result = Review::delete_by_id(review_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ReviewNotFound { id: review_id });
    }

    info!(review_id, "Deleted review");
    Ok(())
}

/// Loads the customer a review points at.
///
/// Returns `Ok(None)` when `customer_id` is null.
///
/// # Errors
/// Returns [`Error::DanglingReference`] when `customer_id` is set but the
/// customer row is missing, or an error if the database query fails.
pub async fn resolve_customer(
    db: &DatabaseConnection,
    review: &review::Model,
) -> Result<Option<entities::customer::Model>> {
    let Some(customer_id) = review.customer_id else {
        return Ok(None);
    };

    match Customer::find_by_id(customer_id).one(db).await? {
        Some(customer) => Ok(Some(customer)),
        None => {
            warn!(
                review_id = review.id,
                customer_id,
                "Review references a missing customer"
            );
            Err(Error::DanglingReference {
                entity: "customer",
                id: customer_id,
            })
        }
    }
}

/// Loads the item a review points at.
///
/// Returns `Ok(None)` when `item_id` is null.
///
/// # Errors
/// Returns [`Error::DanglingReference`] when `item_id` is set but the item row
/// is missing, or an error if the database query fails.
pub async fn resolve_item(
    db: &DatabaseConnection,
    review: &review::Model,
) -> Result<Option<entities::item::Model>> {
    let Some(item_id) = review.item_id else {
        return Ok(None);
    };

    match Item::find_by_id(item_id).one(db).await? {
        Some(item) => Ok(Some(item)),
        None => {
            warn!(
                review_id = review.id,
                item_id,
                "Review references a missing item"
            );
            Err(Error::DanglingReference {
                entity: "item",
                id: item_id,
            })
        }
    }
}

/// Renders a review with its raw foreign keys.
#[must_use]
pub fn render_shallow(review: &review::Model) -> ReviewSummary {
    ReviewSummary {
        id: review.id,
        comment: review.comment.clone(),
        customer_id: review.customer_id,
        item_id: review.item_id,
    }
}

/// Renders a review with its customer and item in shallow form.
///
/// # Errors
/// Returns [`Error::DanglingReference`] for a key pointing at a missing row,
/// [`Error::ValueOutOfRange`] if the item's price cannot be rendered, or an
/// error if a database query fails.
#[instrument(skip(db, review), fields(review_id = review.id))]
pub async fn render_full(db: &DatabaseConnection, review: &review::Model) -> Result<ReviewView> {
    let customer = resolve_customer(db, review)
        .await?
        .as_ref()
        .map(crate::core::customer::render_shallow);
    let item = resolve_item(db, review)
        .await?
        .as_ref()
        .map(crate::core::item::render_shallow)
        .transpose()?;

    debug!("Rendered full review view");
    Ok(ReviewView {
        id: review.id,
        comment: review.comment.clone(),
        customer,
        item,
    })
}
