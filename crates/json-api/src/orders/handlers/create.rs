//! Create Order Handler

use gazalla::{NewOrder, OrderStatus};
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use gazalla_app::domain::orders::models::OrderUuid;

use crate::{
    extensions::*,
    money::from_json_amount,
    observability::{ShopEvent, record_shop_event},
    orders::{CustomerBody, OrderEnvelope, OrderItemBody, ShippingAddressBody, into_status_error},
};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    /// Identity key of the purchaser, `guest` when anonymous
    pub user_id: String,
    pub customer: CustomerBody,
    pub shipping_address: ShippingAddressBody,
    pub items: Vec<OrderItemBody>,
    pub total: f64,
    /// Initial status, `pending` when omitted
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateOrderRequest {
    fn into_new_order(self) -> Result<NewOrder, StatusError> {
        let status = self
            .status
            .map(|status| status.parse::<OrderStatus>())
            .transpose()
            .or_400("could not parse \"status\"")?
            .unwrap_or_default();

        let items = self
            .items
            .into_iter()
            .map(OrderItemBody::into_order_item)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewOrder {
            user_id: self.user_id,
            customer: self.customer.into(),
            shipping_address: self.shipping_address.into(),
            items,
            total: from_json_amount(self.total, "total")?,
            status,
        })
    }
}

/// Create Order Handler
///
/// Stores a checked-out cart as an order.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.state_or_500()?;
    let new_order = json.into_inner().into_new_order()?;
    let uuid = OrderUuid::new();

    tracing::Span::current().record("order_uuid", tracing::field::display(uuid));

    let order = state
        .app
        .orders
        .create_order(uuid, new_order)
        .await
        .map_err(into_status_error)?;

    record_shop_event(ShopEvent::OrderPlaced);

    info!(total = %order.total, items = order.total_items(), "order placed");

    res.add_header(LOCATION, format!("/api/orders/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderEnvelope {
        order: order.into(),
        message: Some("Order created successfully".to_string()),
    }))
}
