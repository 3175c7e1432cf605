//! Products Data

use crate::domain::products::records::{OptionKind, OptionUuid, ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub stock: u64,
    pub is_active: bool,
}

/// New Product Option Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductOption {
    pub uuid: OptionUuid,
    pub kind: OptionKind,
    pub name: String,
    pub price_adjustment: u64,
}
