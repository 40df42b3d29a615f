//! Customer entity - A named person who writes reviews.
//!
//! Customers own their reviews. The items a customer has reviewed are reachable
//! through those reviews only, they are never stored on the customer row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, may be absent
    pub name: Option<String>,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer has many reviews
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

/// Read-only path from a customer to the items they reviewed, through `reviews`.
impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        super::review::Relation::Item.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::review::Relation::Customer.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Customer {}, {}>",
            self.id,
            self.name.as_deref().unwrap_or("None")
        )
    }
}
