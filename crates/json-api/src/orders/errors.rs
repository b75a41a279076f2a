//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use gazalla_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Order is missing required fields")
        }
        OrdersServiceError::InvalidReference | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failed: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
    }
}
