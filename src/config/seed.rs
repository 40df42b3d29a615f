//! Seed configuration loading from config.toml
//!
//! The file lists customers, items and reviews to insert on first run. Reviews
//! refer to their customer and item by name.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct SeedConfig {
    /// Customers to create
    #[serde(default)]
    pub customers: Vec<CustomerSeed>,
    /// Items to create
    #[serde(default)]
    pub items: Vec<ItemSeed>,
    /// Reviews to create
    #[serde(default)]
    pub reviews: Vec<ReviewSeed>,
}

/// A customer to seed
#[derive(Debug, Deserialize, Clone)]
pub struct CustomerSeed {
    /// Customer name
    pub name: Option<String>,
}

/// An item to seed
#[derive(Debug, Deserialize, Clone)]
pub struct ItemSeed {
    /// Item name
    pub name: Option<String>,
    /// Unit price, rounded to two places on insert
    pub price: Option<f64>,
}

/// A review to seed
#[derive(Debug, Deserialize, Clone)]
pub struct ReviewSeed {
    /// Review body
    pub comment: Option<String>,
    /// Name of the reviewing customer
    pub customer: Option<String>,
    /// Name of the reviewed item
    pub item: Option<String>,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Path of the seed file: `CONFIG_PATH`, or `./config.toml`.
#[must_use]
pub fn config_path() -> PathBuf {
    std::env::var("CONFIG_PATH")
        .map_or_else(|_| PathBuf::from("config.toml"), PathBuf::from)
}

/// Loads the seed file from [`config_path`], or `None` if it does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_config() -> Result<Option<SeedConfig>> {
    let path = config_path();
    if !path.exists() {
        info!("No seed file at {}, skipping seeding", path.display());
        return Ok(None);
    }
    load_config(&path).map(Some)
}
