//! Order Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod status;

use gazalla::{Customer, OrderItem, ShippingAddress};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gazalla_app::domain::orders::models::Order;

use crate::money::{from_json_amount, to_json_amount};

/// Purchaser contact details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomerBody {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<CustomerBody> for Customer {
    fn from(body: CustomerBody) -> Self {
        Customer {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
        }
    }
}

impl From<Customer> for CustomerBody {
    fn from(customer: Customer) -> Self {
        CustomerBody {
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
        }
    }
}

/// Delivery address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingAddressBody {
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(body: ShippingAddressBody) -> Self {
        ShippingAddress {
            address: body.address,
            city: body.city,
            zip_code: body.zip_code,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressBody {
    fn from(address: ShippingAddress) -> Self {
        ShippingAddressBody {
            address: address.address,
            city: address.city,
            zip_code: address.zip_code,
        }
    }
}

/// A purchased line.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemBody {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

impl OrderItemBody {
    pub(crate) fn into_order_item(self) -> Result<OrderItem, salvo::http::StatusError> {
        Ok(OrderItem {
            product_id: self.product_id,
            name: self.name,
            quantity: self.quantity,
            price: from_json_amount(self.price, "price")?,
        })
    }
}

impl From<OrderItem> for OrderItemBody {
    fn from(item: OrderItem) -> Self {
        OrderItemBody {
            product_id: item.product_id,
            name: item.name,
            quantity: item.quantity,
            price: to_json_amount(item.price),
        }
    }
}

/// Order as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub id: Uuid,

    /// Identity key of the purchaser
    pub user_id: String,

    pub customer: CustomerBody,

    pub shipping_address: ShippingAddressBody,

    pub items: Vec<OrderItemBody>,

    /// Units across all lines
    pub total_items: u64,

    /// Amount charged, tax included
    pub total: f64,

    /// `pending`, `processing`, `shipped`, `delivered` or `cancelled`
    pub status: String,

    pub created_at: String,

    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let total_items = order.total_items();

        OrderResponse {
            id: order.uuid.into(),
            user_id: order.user_id,
            customer: order.customer.into(),
            shipping_address: order.shipping_address.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            total_items,
            total: to_json_amount(order.total),
            status: order.status.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// A single order with an optional confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderEnvelope {
    pub order: OrderResponse,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
