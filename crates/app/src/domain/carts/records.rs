//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        products::records::{OptionUuid, ProductUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
///
/// Prices are read from the catalog every time the cart is listed and are
/// for display only.
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub size_uuid: Option<OptionUuid>,
    pub temperature_uuid: Option<OptionUuid>,
    pub variant_uuid: Option<OptionUuid>,
    pub unit_price: u64,
    pub line_total: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
