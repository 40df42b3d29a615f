//! Unified error type for the review ledger.

use sea_orm::DbErr;
use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage engine failure, including foreign-key violations
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable cause
        message: String,
    },

    /// No customer with this id
    #[error("Customer {id} not found")]
    CustomerNotFound {
        /// Requested id
        id: i64,
    },

    /// No item with this id
    #[error("Item {id} not found")]
    ItemNotFound {
        /// Requested id
        id: i64,
    },

    /// No review with this id
    #[error("Review {id} not found")]
    ReviewNotFound {
        /// Requested id
        id: i64,
    },

    /// A non-null foreign key points at a row that does not exist
    #[error("Dangling reference: {entity} {id} does not exist")]
    DanglingReference {
        /// Referenced entity name
        entity: &'static str,
        /// Referenced id
        id: i64,
    },

    /// A value does not fit the representable range at the serialization boundary
    #[error("Value out of range: {value}")]
    ValueOutOfRange {
        /// Offending value, as text
        value: String,
    },

    /// JSON encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
