//! Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    pricing::TAX_RATE,
    products::{Category, Product},
};

/// Reasons a line item cannot enter a cart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LineItemError {
    /// The item has no product identifier.
    #[error("line item is missing a product id")]
    MissingId,

    /// The item was given a quantity of zero.
    #[error("line item \"{0}\" has a zero quantity")]
    ZeroQuantity(String),

    /// The item carries a negative price.
    #[error("line item \"{0}\" has a negative price")]
    NegativePrice(String),

    /// Price times quantity, with tax, exceeds what a [`Decimal`] can hold.
    #[error("line item \"{0}\" has a price out of range")]
    PriceOutOfRange(String),
}

/// A product reference plus the requested quantity.
///
/// Product attributes are copied at the time of adding, so later catalog edits do not
/// change what is already in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identifier. At most one line item per id exists in a cart.
    pub id: String,

    /// Product name at time of adding
    pub name: String,

    /// Unit price at time of adding, stored as a decimal string so it reads back exactly
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,

    /// Requested quantity, always at least one while the item exists
    pub quantity: u32,

    /// Product description at time of adding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Product department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Product image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Stock level seen when the item was added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl LineItem {
    /// Creates a bare line item with no denormalised product details.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            description: None,
            category: None,
            image_url: None,
            stock: None,
        }
    }

    /// Copies a catalog product into a line item with the given quantity.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity,
            description: Some(product.description.clone()),
            category: Some(product.category),
            image_url: Some(product.image_url.clone()).filter(|url| !url.is_empty()),
            stock: Some(product.stock),
        }
    }

    /// Checks the invariants every line item in a cart must hold.
    ///
    /// # Errors
    ///
    /// - [`LineItemError::MissingId`]: the id is empty or only whitespace.
    /// - [`LineItemError::ZeroQuantity`]: the quantity is zero.
    /// - [`LineItemError::NegativePrice`]: the price is below zero.
    /// - [`LineItemError::PriceOutOfRange`]: the taxed line total overflows.
    pub fn validate(&self) -> Result<(), LineItemError> {
        if self.id.trim().is_empty() {
            return Err(LineItemError::MissingId);
        }

        if self.quantity == 0 {
            return Err(LineItemError::ZeroQuantity(self.id.clone()));
        }

        if self.price < Decimal::ZERO {
            return Err(LineItemError::NegativePrice(self.id.clone()));
        }

        let taxed = self
            .price
            .checked_mul(Decimal::from(self.quantity))
            .and_then(|total| total.checked_mul(Decimal::ONE + TAX_RATE));

        if taxed.is_none() {
            return Err(LineItemError::PriceOutOfRange(self.id.clone()));
        }

        Ok(())
    }

    /// Price multiplied by quantity, saturating at [`Decimal::MAX`].
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}
