//! View shapes returned by the render functions.
//!
//! Optional values are serialized as `null` and collections as arrays, a field
//! is never omitted from the output.

use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// Shallow customer view: own columns only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    /// Customer id
    pub id: i64,
    /// Customer name
    pub name: Option<String>,
}

/// Full customer view with reviews and the derived items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerView {
    /// Customer id
    pub id: i64,
    /// Customer name
    pub name: Option<String>,
    /// Reviews in attachment order
    pub reviews: Vec<ReviewSummary>,
    /// One item per review, in the same order as `reviews`
    pub items: Vec<ItemSummary>,
}

/// Shallow item view: own columns only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    /// Item id
    pub id: i64,
    /// Item name
    pub name: Option<String>,
    /// Price as a plain number
    pub price: Option<f64>,
}

/// Full item view with its reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    /// Item id
    pub id: i64,
    /// Item name
    pub name: Option<String>,
    /// Price as a plain number
    pub price: Option<f64>,
    /// Reviews in attachment order
    pub reviews: Vec<ReviewSummary>,
}

/// Shallow review view: raw foreign keys instead of nested objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Review id
    pub id: i64,
    /// Review comment
    pub comment: Option<String>,
    /// Raw customer foreign key
    pub customer_id: Option<i64>,
    /// Raw item foreign key
    pub item_id: Option<i64>,
}

/// Full review view with its customer and item in shallow form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewView {
    /// Review id
    pub id: i64,
    /// Review comment
    pub comment: Option<String>,
    /// Linked customer, `None` when the foreign key is null
    pub customer: Option<CustomerSummary>,
    /// Linked item, `None` when the foreign key is null
    pub item: Option<ItemSummary>,
}

impl ItemView {
    /// Drops the `reviews` field, leaving exactly the shallow view.
    #[must_use]
    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
        }
    }
}

impl CustomerView {
    /// Drops the relation fields, leaving exactly the shallow view.
    #[must_use]
    pub fn summary(&self) -> CustomerSummary {
        CustomerSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Converts any view into a `serde_json::Value`.
///
/// # Errors
/// Returns an error if the value cannot be represented as JSON.
pub fn to_json<T: Serialize>(view: &T) -> Result<serde_json::Value> {
    serde_json::to_value(view).map_err(Into::into)
}
