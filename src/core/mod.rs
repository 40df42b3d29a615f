//! Core business logic - framework-agnostic repository operations and rendering.
//!
//! Every entity renders at two depths. The full view follows the entity's direct
//! relations one hop and renders the other side in its shallow form, the shallow
//! view carries only the entity's own columns. Full never nests full, so the
//! cyclic Customer - Review - Item graph always terminates.

/// Customer operations and views
pub mod customer;
/// Item operations, views and price conversion
pub mod item;
/// Review operations, views and reference resolution
pub mod review;
/// Seeding the database from configuration
pub mod seed;
/// Serializable view shapes
pub mod views;
