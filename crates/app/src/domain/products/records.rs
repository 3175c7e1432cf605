//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Option UUID
pub type OptionUuid = TypedUuid<ProductOptionRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub stock: u64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// The cart slot an option may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    Size,
    Temperature,
    Variant,
}

impl OptionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Temperature => "temperature",
            Self::Variant => "variant",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown option kind: {0}")]
pub struct UnknownOptionKind(pub String);

impl FromStr for OptionKind {
    type Err = UnknownOptionKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "size" => Ok(Self::Size),
            "temperature" => Ok(Self::Temperature),
            "variant" => Ok(Self::Variant),
            other => Err(UnknownOptionKind(other.to_string())),
        }
    }
}

/// Product Option Record
///
/// A size, temperature or variant choice whose `price_adjustment` is added to
/// the base price of any product it is selected with.
#[derive(Debug, Clone)]
pub struct ProductOptionRecord {
    pub uuid: OptionUuid,
    pub kind: OptionKind,
    pub name: String,
    pub price_adjustment: u64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
