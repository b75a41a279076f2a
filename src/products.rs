//! Products

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stock level at or below which a product is flagged as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Storefront department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Men's accessories
    Men,

    /// Women's accessories
    Women,
}

impl Category {
    /// Wire representation of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known category.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category \"{0}\"")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            _ => Err(UnknownCategory(value.to_string())),
        }
    }
}

/// Catalog product as seen by the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Long description
    pub description: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Department
    pub category: Category,

    /// Image location, empty when the product has none
    #[serde(default)]
    pub image_url: String,

    /// Units in stock. Informational only, never decremented by checkout.
    #[serde(default)]
    pub stock: u32,
}

impl Product {
    /// Whether the storefront should show a "low stock" badge.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }

    /// Whether any units are available.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
