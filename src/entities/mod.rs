//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the `customers`, `items` and `reviews` tables and
//! the foreign keys that join them. Each entity has a Model struct for data and
//! an Entity struct for operations.

pub mod customer;
pub mod item;
pub mod review;

// Re-export specific types to avoid conflicts
pub use customer::{Column as CustomerColumn, Entity as Customer, Model as CustomerModel};
pub use item::{Column as ItemColumn, Entity as Item, Model as ItemModel};
pub use review::{Column as ReviewColumn, Entity as Review, Model as ReviewModel};
