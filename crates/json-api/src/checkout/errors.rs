//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use roastery_app::domain::checkout::CheckoutError;

/// Business rejections become a 400 naming the problem. Storage failures are
/// logged and hidden behind a bare 500.
pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::EmptyCart
        | CheckoutError::InsufficientStock(_)
        | CheckoutError::Validation(_) => StatusError::bad_request().brief(error.to_string()),
        CheckoutError::Persistence(source) => {
            error!("checkout failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
