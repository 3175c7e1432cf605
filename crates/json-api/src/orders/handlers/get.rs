//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roastery_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Human-readable order number
    pub order_number: String,

    /// Lifecycle status
    pub status: String,

    pub email: String,

    pub full_name: String,

    pub delivery_address: String,

    /// One of `dine_in`, `door_delivery` or `pick_up`
    pub delivery_method: String,

    pub payment_method_id: i64,

    /// Sum of line totals
    pub subtotal: u64,

    pub delivery_fee: u64,

    pub tax_amount: u64,

    /// Amount charged
    pub total: u64,

    /// Ordered lines; empty in listings
    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            order_number: order.order_number,
            status: order.status.to_string(),
            email: order.email,
            full_name: order.full_name,
            delivery_address: order.delivery_address,
            delivery_method: order.delivery_method.to_string(),
            payment_method_id: order.payment_method_id,
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            tax_amount: order.tax_amount,
            total: order.total,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    /// Product name at the time of purchase
    pub product_name: String,

    pub quantity: u32,

    pub size_uuid: Option<Uuid>,

    pub temperature_uuid: Option<Uuid>,

    pub variant_uuid: Option<Uuid>,

    /// Charged unit price including option adjustments
    pub unit_price: u64,

    pub line_total: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
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
        }
    }
}

/// Get Order Handler
///
/// Returns one of the caller's orders with its items.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let order = state
        .app
        .orders
        .get_order(principal.user_uuid, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
