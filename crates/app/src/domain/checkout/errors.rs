//! Checkout errors.

use std::fmt;

use thiserror::Error;

use crate::domain::products::records::ProductUuid;

/// One product whose combined cart quantity exceeds its stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockShortfall {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub requested: u64,
    pub available: u64,
}

impl fmt::Display for StockShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (requested {}, available {})",
            self.product_name, self.requested, self.available
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email is required")]
    MissingEmail,

    #[error("full name is required")]
    MissingFullName,

    #[error("address is required")]
    MissingAddress,

    #[error("invalid delivery method: {0}")]
    InvalidDeliveryMethod(String),

    #[error("product is no longer available: {0}")]
    ProductUnavailable(String),

    #[error("selected option is no longer available for {0}")]
    OptionUnavailable(String),

    #[error("order amount is too large")]
    AmountOverflow,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("insufficient stock for {}", join_shortfalls(.0))]
    InsufficientStock(Vec<StockShortfall>),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error")]
    Persistence(#[source] sqlx::Error),
}

/// Outcome label for a checkout that produced an order.
pub const SUCCESS_OUTCOME: &str = "success";

impl CheckoutError {
    /// Short label for the failure family, used for logs and metrics.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::EmptyCart => "empty_cart",
            Self::InsufficientStock(_) => "insufficient_stock",
            Self::Validation(_) => "validation",
            Self::Persistence(_) => "persistence",
        }
    }
}

impl From<sqlx::Error> for CheckoutError {
    fn from(error: sqlx::Error) -> Self {
        Self::Persistence(error)
    }
}

fn join_shortfalls(shortfalls: &[StockShortfall]) -> String {
    shortfalls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
