//! Orders

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::LineItem;

/// Fulfilment status of an order. Any status may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet processed
    #[default]
    Pending,

    /// Being prepared
    Processing,

    /// Handed to the carrier
    Shipped,

    /// Received by the customer
    Delivered,

    /// Will not be fulfilled
    Cancelled,
}

impl OrderStatus {
    /// All statuses in fulfilment order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Wire representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known order status.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status \"{0}\"")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalised)
            .ok_or_else(|| UnknownOrderStatus(value.to_string()))
    }
}

/// Customer contact details captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Contact email
    pub email: String,
}

/// Delivery address captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// Postal code
    pub zip_code: String,
}

/// A purchased line, frozen at the time of checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product identifier
    pub product_id: String,

    /// Product name at time of purchase
    pub name: String,

    /// Units bought
    pub quantity: u32,

    /// Unit price at time of purchase
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl OrderItem {
    /// Price multiplied by quantity.
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

impl From<&LineItem> for OrderItem {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// An order ready to be handed to order storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Identity key of the purchaser (`guest` for anonymous checkouts)
    pub user_id: String,

    /// Contact details
    pub customer: Customer,

    /// Delivery address
    pub shipping_address: ShippingAddress,

    /// Purchased lines
    pub items: Vec<OrderItem>,

    /// Amount charged, tax included
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,

    /// Initial status
    #[serde(default)]
    pub status: OrderStatus,
}
