//! Update Order Status Handler

use gazalla::OrderStatus;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{OrderEnvelope, into_status_error},
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// `pending`, `processing`, `shipped`, `delivered` or `cancelled`
    pub status: String,
}

/// Update Order Status Handler
///
/// Any status may follow any other.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.state_or_500()?;

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("could not parse \"status\"")?;

    let order = state
        .app
        .orders
        .update_order_status(order.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderEnvelope {
        order: order.into(),
        message: Some("Order status updated successfully".to_string()),
    }))
}
