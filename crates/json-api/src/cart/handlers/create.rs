//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roastery_app::domain::carts::{data::NewCartItem, records::CartItemUuid};

use crate::{
    cart::{errors::into_status_error, index::CartItemResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Optional line UUID; generated when omitted
    pub uuid: Option<Uuid>,

    pub product_uuid: Uuid,

    pub quantity: u32,

    pub size_uuid: Option<Uuid>,

    pub temperature_uuid: Option<Uuid>,

    pub variant_uuid: Option<Uuid>,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartItem {
            uuid: request
                .uuid
                .map_or_else(CartItemUuid::new, CartItemUuid::from_uuid),
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
            size_uuid: request.size_uuid.map(Into::into),
            temperature_uuid: request.temperature_uuid.map(Into::into),
            variant_uuid: request.variant_uuid.map(Into::into),
        }
    }
}

/// Add Cart Item Handler
///
/// Adding a selection already in the cart increases its quantity.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart line stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let item = state
        .app
        .carts
        .add_item(principal.user_uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/cart/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
