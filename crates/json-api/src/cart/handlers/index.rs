//! List Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roastery_app::domain::carts::records::CartItemRecord;

use crate::{cart::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The lines in the cart
    pub items: Vec<CartItemResponse>,

    /// Sum of line totals at current catalog prices
    pub subtotal: u64,
}

/// Cart Item Response
///
/// Prices are indicative; checkout recomputes them.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart line
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    pub product_name: String,

    pub quantity: u32,

    pub size_uuid: Option<Uuid>,

    pub temperature_uuid: Option<Uuid>,

    pub variant_uuid: Option<Uuid>,

    /// Product price plus selected option adjustments
    pub unit_price: u64,

    pub line_total: u64,

    /// The date and time the line was added
    pub created_at: String,

    /// The date and time the line was last updated
    pub updated_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            quantity: item.quantity,
            size_uuid: item.size_uuid.map(Into::into),
            temperature_uuid: item.temperature_uuid.map(Into::into),
            variant_uuid: item.variant_uuid.map(Into::into),
            unit_price: item.unit_price,
            line_total: item.line_total,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// List Cart Handler
///
/// Returns the caller's cart lines.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let items = state
        .app
        .carts
        .list_items(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    let subtotal = items
        .iter()
        .try_fold(0_u64, |sum, item| sum.checked_add(item.line_total))
        .ok_or_else(|| StatusError::internal_server_error().brief("Cart total overflowed"))?;

    Ok(Json(CartResponse {
        items: items.into_iter().map(CartItemResponse::from).collect(),
        subtotal,
    }))
}
