//! Cart snapshots
//!
//! Snapshots are the JSON arrays persisted under a `cart_<identity>` slot. Older writers used
//! a few different shapes for the same line item (`_id` or `productId` instead of `id`,
//! `image` instead of `imageUrl`, ids and prices as strings), so every read goes through
//! [`decode_snapshot`], which produces canonical [`LineItem`]s and drops anything invalid.

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Deserialize;
use serde_json::{Number, Value};
use thiserror::Error;
use tracing::warn;

use crate::{items::LineItem, products::Category};

/// Errors decoding or encoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The payload is not a JSON array.
    #[error("malformed cart snapshot: {0}")]
    Malformed(String),

    /// Serialisation failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result of decoding a persisted snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedSnapshot {
    /// Valid line items, in stored order
    pub items: Vec<LineItem>,

    /// Number of entries that were discarded
    pub dropped: usize,
}

impl DecodedSnapshot {
    /// Whether any stored entries were discarded.
    pub fn had_invalid_entries(&self) -> bool {
        self.dropped > 0
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(Number),
    Text(String),
}

impl Loose {
    fn into_text(self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text,
        }
    }

    fn to_decimal(&self) -> Option<Decimal> {
        let text = match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.trim().to_string(),
        };

        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }

    fn to_whole(&self) -> Option<i64> {
        self.to_decimal()?.trunc().to_i64()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLineItem {
    #[serde(default, alias = "_id", alias = "productId")]
    id: Option<Loose>,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    price: Option<Loose>,

    #[serde(default)]
    quantity: Option<Loose>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    category: Option<String>,

    #[serde(default, alias = "image")]
    image_url: Option<String>,

    #[serde(default)]
    stock: Option<Loose>,
}

impl StoredLineItem {
    fn into_line_item(self) -> Option<LineItem> {
        let price = match &self.price {
            Some(price) => price.to_decimal()?,
            None => Decimal::ZERO,
        };

        let quantity = match &self.quantity {
            Some(quantity) => u32::try_from(quantity.to_whole()?.max(0)).ok()?,
            None => 1,
        };

        Some(LineItem {
            id: self.id.map(Loose::into_text).unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            price,
            quantity,
            description: self.description,
            category: self
                .category
                .as_deref()
                .and_then(|category| Category::from_str(category).ok()),
            image_url: self.image_url.filter(|url| !url.is_empty()),
            stock: self
                .stock
                .as_ref()
                .and_then(Loose::to_whole)
                .and_then(|stock| u32::try_from(stock).ok()),
        })
    }
}

/// Decodes a persisted snapshot into canonical line items.
///
/// Entries that are not objects, cannot be interpreted, or fail [`LineItem::validate`] are
/// dropped and counted.
///
/// # Errors
///
/// Returns [`SnapshotError::Malformed`] if the payload is not a JSON array.
pub fn decode_snapshot(raw: &str) -> Result<DecodedSnapshot, SnapshotError> {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            return Err(SnapshotError::Malformed(format!(
                "expected an array, found {}",
                json_kind(&other)
            )));
        }
        Err(err) => return Err(SnapshotError::Malformed(err.to_string())),
    };

    let mut decoded = DecodedSnapshot {
        items: Vec::with_capacity(entries.len()),
        dropped: 0,
    };

    for (index, entry) in entries.into_iter().enumerate() {
        let item = serde_json::from_value::<StoredLineItem>(entry)
            .ok()
            .and_then(StoredLineItem::into_line_item);

        match item {
            Some(item) => match item.validate() {
                Ok(()) => decoded.items.push(item),
                Err(reason) => {
                    warn!(index, %reason, "dropping invalid cart entry");
                    decoded.dropped += 1;
                }
            },
            None => {
                warn!(index, "dropping unreadable cart entry");
                decoded.dropped += 1;
            }
        }
    }

    Ok(decoded)
}

/// Encodes line items as a camelCase JSON array.
///
/// Prices are written as decimal strings so a reader gets back exactly the value written.
///
/// # Errors
///
/// Returns [`SnapshotError::Json`] if serialisation fails.
pub fn encode_snapshot(items: &[LineItem]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(items)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
