//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{cart::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClearCartResponse {
    /// Number of cart lines deleted.
    pub removed: u64,
}

/// Clear Cart Handler
///
/// Removes every line from the caller's cart. Clearing an empty cart is not
/// an error.
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ClearCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let removed = state
        .app
        .carts
        .clear(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ClearCartResponse { removed }))
}
