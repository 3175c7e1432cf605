//! Cart Data

use crate::domain::{
    carts::records::CartItemUuid,
    products::records::{OptionUuid, ProductUuid},
};

/// New Cart Item Data
///
/// Adding a selection that already exists in the cart increases its quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub size_uuid: Option<OptionUuid>,
    pub temperature_uuid: Option<OptionUuid>,
    pub variant_uuid: Option<OptionUuid>,
}
