//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use roastery_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidTransition { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order data"),
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
