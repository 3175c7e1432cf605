//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        checkout::delivery::DeliveryMethod,
        orders::status::OrderStatus,
        products::records::{OptionUuid, ProductUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Record
///
/// `items` is only populated when a single order is loaded; listings leave
/// it empty.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub user_uuid: UserUuid,
    pub status: OrderStatus,
    pub email: String,
    pub full_name: String,
    pub delivery_address: String,
    pub delivery_method: DeliveryMethod,
    pub payment_method_id: i64,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub tax_amount: u64,
    pub total: u64,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Record
///
/// A snapshot of a cart line as it was charged.
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub size_uuid: Option<OptionUuid>,
    pub temperature_uuid: Option<OptionUuid>,
    pub variant_uuid: Option<OptionUuid>,
    pub unit_price: u64,
    pub line_total: u64,
    pub created_at: Timestamp,
}
