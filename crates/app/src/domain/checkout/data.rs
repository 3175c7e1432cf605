//! Checkout Data

use std::time::Duration;

/// Flat surcharge applied to door deliveries.
pub const DEFAULT_DOOR_DELIVERY_FEE: u64 = 10_000;

/// How long checkout may wait on row locks or a single statement.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Payment method recorded when the caller gives none, or a non-positive one.
pub const DEFAULT_PAYMENT_METHOD_ID: i64 = 1;

/// Checkout Request
///
/// Every field is optional. Contact fields fall back to the stored profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub delivery_method: Option<String>,
    pub payment_method_id: Option<i64>,
}

impl CheckoutRequest {
    #[must_use]
    pub fn payment_method_id(&self) -> i64 {
        self.payment_method_id
            .filter(|id| *id > 0)
            .unwrap_or(DEFAULT_PAYMENT_METHOD_ID)
    }
}

/// Checkout Settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub door_delivery_fee: u64,

    /// Tax rate in basis points of the subtotal; `0` disables tax.
    pub tax_rate_bps: u64,

    pub lock_timeout: Duration,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            door_delivery_fee: DEFAULT_DOOR_DELIVERY_FEE,
            tax_rate_bps: 0,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }
}
