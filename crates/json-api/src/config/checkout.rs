//! Checkout Config

use std::time::Duration;

use clap::Args;

use roastery_app::domain::checkout::data::CheckoutSettings;

/// Checkout pricing and locking settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Flat fee added to door deliveries, in minor currency units
    #[arg(long, env = "CHECKOUT_DOOR_DELIVERY_FEE", default_value_t = 10_000_u64)]
    pub door_delivery_fee: u64,

    /// Tax rate in basis points of the subtotal (0 disables tax)
    #[arg(long, env = "CHECKOUT_TAX_RATE_BPS", default_value_t = 0_u64)]
    pub tax_rate_bps: u64,

    /// Upper bound on row lock waits and statements during checkout
    #[arg(long, env = "CHECKOUT_LOCK_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub lock_timeout_ms: u64,
}

impl CheckoutConfig {
    #[must_use]
    pub fn settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            door_delivery_fee: self.door_delivery_fee,
            tax_rate_bps: self.tax_rate_bps,
            lock_timeout: Duration::from_millis(self.lock_timeout_ms),
        }
    }
}
