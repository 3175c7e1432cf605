//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use roastery_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::InvalidQuantity
        | CartsServiceError::ProductUnavailable
        | CartsServiceError::InvalidOption(_) => StatusError::bad_request().brief(error.to_string()),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart item payload")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
