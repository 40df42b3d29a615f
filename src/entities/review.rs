//! Review entity - Links one customer to one item with a comment.
//!
//! Both foreign keys are nullable. Constraint names follow the
//! `fk_<table>_<column>_<referenced_table>` convention.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    /// Unique identifier assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Free-text review body
    pub comment: Option<String>,
    /// ID of the customer who wrote the review
    pub customer_id: Option<i64>,
    /// ID of the reviewed item
    pub item_id: Option<i64>,
}

/// Defines relationships between Review and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each review belongs to at most one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        fk_name = "fk_reviews_customer_id_customers"
    )]
    Customer,
    /// Each review belongs to at most one item
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id",
        fk_name = "fk_reviews_item_id_items"
    )]
    Item,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Review {}, {}>",
            self.id,
            self.comment.as_deref().unwrap_or("None")
        )
    }
}
