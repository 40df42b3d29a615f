//! Customer business logic - Handles all customer-related operations.
//!
//! Provides functions for creating, retrieving, renaming and deleting customers,
//! plus the customer's two views. The items a customer has reviewed are always
//! computed from the current reviews and never cached.

use crate::{
    core::views::{CustomerSummary, CustomerView, ItemSummary},
    entities::{self, Customer, Review, customer, review},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Retrieves all customers, ordered by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_customers(db: &DatabaseConnection) -> Result<Vec<customer::Model>> {
    Customer::find()
        .order_by_asc(customer::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a customer by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_customer_by_id(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Option<customer::Model>> {
    Customer::find_by_id(customer_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new customer. The name is optional and stored as given.
///
/// # Errors
/// Returns an error if the insert fails.
#[instrument(skip(db))]
pub async fn create_customer(
    db: &DatabaseConnection,
    name: Option<String>,
) -> Result<customer::Model> {
    let customer = customer::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(customer_id = customer.id, "Created customer");
    Ok(customer)
}

/// Changes a customer's name.
///
/// # Errors
/// Returns [`Error::CustomerNotFound`] if no such customer exists, or an error
/// if the update fails.
#[instrument(skip(db))]
pub async fn rename_customer(
    db: &DatabaseConnection,
    customer_id: i64,
    name: Option<String>,
) -> Result<customer::Model> {
    let mut customer: customer::ActiveModel = Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or(Error::CustomerNotFound { id: customer_id })?
        .into();

    customer.name = Set(name);
    let customer = customer.update(db).await?;

    info!(customer_id, "Renamed customer");
    Ok(customer)
}

/// Deletes a customer.
///
/// Reviews are not cascaded. If any review still references the customer the
/// storage engine decides the outcome, under `SQLite` with foreign keys enabled
/// the delete is refused with [`Error::Database`].
///
/// # Errors
/// Returns [`Error::CustomerNotFound`] if no such customer exists, or an error
/// if the delete fails.
#[instrument(skip(db))]
pub async fn delete_customer(db: &DatabaseConnection, customer_id: i64) -> Result<()> {
    let result = Customer::delete_by_id(customer_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::CustomerNotFound { id: customer_id });
    }

    info!(customer_id, "Deleted customer");
    Ok(())
}

/// Retrieves a customer's reviews in attachment order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_reviews_for_customer(
    db: &DatabaseConnection,
    customer: &customer::Model,
) -> Result<Vec<review::Model>> {
    customer
        .find_related(Review)
        .order_by_asc(review::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Items the customer has reviewed, one per review in attachment order.
///
/// A customer who reviewed the same item twice gets it twice. Reviews without
/// an item contribute nothing.
///
/// # Errors
/// Returns [`Error::DanglingReference`] if a review names a missing item, or an
/// error if a database query fails.
pub async fn items_of(
    db: &DatabaseConnection,
    customer: &customer::Model,
) -> Result<Vec<entities::item::Model>> {
    let reviews = get_reviews_for_customer(db, customer).await?;
    items_for_reviews(db, &reviews).await
}

async fn items_for_reviews(
    db: &DatabaseConnection,
    reviews: &[review::Model],
) -> Result<Vec<entities::item::Model>> {
    let mut items = Vec::with_capacity(reviews.len());
    for review in reviews {
        if let Some(item) = crate::core::review::resolve_item(db, review).await? {
            items.push(item);
        }
    }
    Ok(items)
}

/// Renders a customer's own columns.
#[must_use]
pub fn render_shallow(customer: &customer::Model) -> CustomerSummary {
    CustomerSummary {
        id: customer.id,
        name: customer.name.clone(),
    }
}

/// Renders a customer with shallow reviews and the derived shallow items.
///
/// # Errors
/// Returns [`Error::DanglingReference`] if a review names a missing item,
/// [`Error::ValueOutOfRange`] if an item price cannot be rendered, or an error
/// if a database query fails.
#[instrument(skip(db, customer), fields(customer_id = customer.id))]
pub async fn render_full(
    db: &DatabaseConnection,
    customer: &customer::Model,
) -> Result<CustomerView> {
    let reviews = get_reviews_for_customer(db, customer).await?;
    let items = items_for_reviews(db, &reviews)
        .await?
        .iter()
        .map(crate::core::item::render_shallow)
        .collect::<Result<Vec<ItemSummary>>>()?;

    debug!(
        reviews = reviews.len(),
        items = items.len(),
        "Rendered full customer view"
    );
    Ok(CustomerView {
        id: customer.id,
        name: customer.name.clone(),
        reviews: reviews
            .iter()
            .map(crate::core::review::render_shallow)
            .collect(),
        items,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{item, review::create_review, views::to_json};
    use crate::test_utils::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[tokio::test]
    async fn test_customer_without_reviews_renders_empty_arrays() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Lonely").await?;

        let view = render_full(&db, &customer).await?;

        assert_eq!(
            to_json(&view)?,
            json!({"id": customer.id, "name": "Lonely", "reviews": [], "items": []})
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_reviews_preserve_attachment_order() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Ada").await?;
        let other = create_test_customer(&db, "Bob").await?;
        let item = create_test_item(&db, "Widget").await?;

        let first = create_review(
            &db,
            Some("one".to_string()),
            Some(customer.id),
            Some(item.id),
        )
        .await?;
        create_review(
            &db,
            Some("not mine".to_string()),
            Some(other.id),
            Some(item.id),
        )
        .await?;
        let third = create_review(&db, Some("two".to_string()), Some(customer.id), None).await?;

        let view = render_full(&db, &customer).await?;

        assert_eq!(view.reviews.len(), 2);
        assert_eq!(view.reviews[0].id, first.id);
        assert_eq!(view.reviews[1].id, third.id);
        assert_eq!(view.reviews[1].item_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_items_follow_reviews() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Ada").await?;
        let widget = create_custom_item(&db, Some("Widget"), Some(Decimal::new(999, 2))).await?;
        let gadget = create_custom_item(&db, Some("Gadget"), None).await?;

        create_review(&db, None, Some(customer.id), Some(gadget.id)).await?;
        create_review(&db, None, Some(customer.id), Some(widget.id)).await?;
        create_review(&db, None, Some(customer.id), Some(gadget.id)).await?;

        let view = render_full(&db, &customer).await?;

        assert_eq!(view.items.len(), view.reviews.len());
        for (summary, review) in view.items.iter().zip(&view.reviews) {
            let reviewed = item::get_item_by_id(&db, review.item_id.unwrap())
                .await?
                .unwrap();
            assert_eq!(summary, &item::render_shallow(&reviewed)?);
        }
        // repeated items are not collapsed
        assert_eq!(view.items[0].id, gadget.id);
        assert_eq!(view.items[2].id, gadget.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_items_reflect_current_reviews() -> Result<()> {
        let (db, customer, item, review) = setup_with_review().await?;
        assert_eq!(items_of(&db, &customer).await?.len(), 1);

        crate::core::review::delete_review(&db, review.id).await?;

        assert!(items_of(&db, &customer).await?.is_empty());
        let view = render_full(&db, &customer).await?;
        assert!(view.items.is_empty());
        assert!(view.reviews.is_empty());

        create_review(&db, None, Some(customer.id), Some(item.id)).await?;
        assert_eq!(items_of(&db, &customer).await?, vec![item]);
        Ok(())
    }

    #[tokio::test]
    async fn test_reviews_without_item_are_skipped_in_items() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Ada").await?;
        let widget = create_test_item(&db, "Widget").await?;

        create_review(&db, Some("no item".to_string()), Some(customer.id), None).await?;
        create_review(&db, None, Some(customer.id), Some(widget.id)).await?;

        let view = render_full(&db, &customer).await?;

        assert_eq!(view.reviews.len(), 2);
        assert_eq!(view.reviews[0].item_id, None);
        assert_eq!(view.items, vec![item::render_shallow(&widget)?]);
        Ok(())
    }

    #[tokio::test]
    async fn test_related_items_match_items_of() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Ada").await?;
        let widget = create_test_item(&db, "Widget").await?;
        let gadget = create_test_item(&db, "Gadget").await?;
        create_test_item(&db, "Unreviewed").await?;

        create_review(&db, None, Some(customer.id), Some(gadget.id)).await?;
        create_review(&db, None, Some(customer.id), Some(widget.id)).await?;
        create_review(&db, None, Some(customer.id), None).await?;

        // The join has no ordering and drops dangling keys without an error,
        // so only the id sets are comparable.
        let mut joined: Vec<i64> = customer
            .find_related(entities::Item)
            .all(&db)
            .await?
            .iter()
            .map(|i| i.id)
            .collect();
        let mut derived: Vec<i64> = items_of(&db, &customer)
            .await?
            .iter()
            .map(|i| i.id)
            .collect();
        joined.sort_unstable();
        derived.sort_unstable();

        assert_eq!(joined, derived);
        assert_eq!(joined, vec![widget.id, gadget.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_render_shallow_is_full_without_relations() -> Result<()> {
        let (db, customer, _item, _review) = setup_with_review().await?;

        let view = render_full(&db, &customer).await?;

        assert_eq!(view.summary(), render_shallow(&customer));
        assert_eq!(
            to_json(&render_shallow(&customer))?,
            json!({"id": customer.id, "name": "Test Customer"})
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_rename_customer() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Ada").await?;

        let renamed = rename_customer(&db, customer.id, None).await?;
        assert_eq!(renamed.name, None);

        let result = rename_customer(&db, customer.id + 100, Some("x".to_string())).await;
        assert!(matches!(result, Err(Error::CustomerNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_customer() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Ada").await?;

        delete_customer(&db, customer.id).await?;

        assert!(get_customer_by_id(&db, customer.id).await?.is_none());
        let result = delete_customer(&db, customer.id).await;
        assert!(matches!(result, Err(Error::CustomerNotFound { id }) if id == customer.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_referenced_customer_is_refused() -> Result<()> {
        let (db, customer, _item, review) = setup_with_review().await?;

        let result = delete_customer(&db, customer.id).await;

        assert!(matches!(result, Err(Error::Database(_))));
        assert!(get_customer_by_id(&db, customer.id).await?.is_some());
        let review = crate::core::review::get_review_by_id(&db, review.id)
            .await?
            .unwrap();
        assert_eq!(review.customer_id, Some(customer.id));
        Ok(())
    }

    #[test]
    fn test_display() {
        let customer = customer::Model {
            id: 4,
            name: Some("Ada".to_string()),
        };
        assert_eq!(customer.to_string(), "<Customer 4, Ada>");
    }
}
