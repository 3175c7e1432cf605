//! Delivery methods and their fees.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::checkout::{data::CheckoutSettings, errors::ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    #[default]
    DineIn,
    DoorDelivery,
    PickUp,
}

impl DeliveryMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DineIn => "dine_in",
            Self::DoorDelivery => "door_delivery",
            Self::PickUp => "pick_up",
        }
    }

    /// Parse caller input. Blank or missing input selects dine-in.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDeliveryMethod`] for unknown names.
    pub fn parse_input(raw: Option<&str>) -> Result<Self, ValidationError> {
        let trimmed = raw.map(str::trim).unwrap_or_default();

        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        trimmed
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| ValidationError::InvalidDeliveryMethod(trimmed.to_string()))
    }

    #[must_use]
    pub const fn fee(self, settings: &CheckoutSettings) -> u64 {
        match self {
            Self::DoorDelivery => settings.door_delivery_fee,
            Self::DineIn | Self::PickUp => 0,
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown delivery method: {0}")]
pub struct UnknownDeliveryMethod(pub String);

impl FromStr for DeliveryMethod {
    type Err = UnknownDeliveryMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dine_in" => Ok(Self::DineIn),
            "door_delivery" => Ok(Self::DoorDelivery),
            "pick_up" => Ok(Self::PickUp),
            other => Err(UnknownDeliveryMethod(other.to_string())),
        }
    }
}
