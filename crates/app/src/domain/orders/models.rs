//! Order Models

use gazalla::{Customer, NewOrder, OrderItem, OrderStatus, ShippingAddress};
use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_id: String,
    pub customer: Customer,
    pub shipping_address: ShippingAddress,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Builds a stored order from a submission, stamping both timestamps with `now`.
    #[must_use]
    pub fn from_new(uuid: OrderUuid, order: NewOrder, now: Timestamp) -> Self {
        Self {
            uuid,
            user_id: order.user_id,
            customer: order.customer,
            shipping_address: order.shipping_address,
            items: order.items,
            total: order.total,
            status: order.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
