//! Server configuration module

use clap::Parser;

use crate::config::{
    checkout::CheckoutConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ListenConfig,
};

pub(crate) mod checkout;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Roastery JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "roastery-json", about = "Roastery JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ListenConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Checkout pricing and locking settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_parse_uses_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "roastery-json",
            "--database-url",
            "postgres://localhost/roastery",
        ])?;

        let settings = config.checkout.settings();

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);
        assert_eq!(settings.door_delivery_fee, 10_000);
        assert_eq!(settings.tax_rate_bps, 0);
        assert_eq!(settings.lock_timeout, Duration::from_secs(5));

        Ok(())
    }

    #[test]
    fn test_parse_checkout_overrides() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "roastery-json",
            "--database-url",
            "postgres://localhost/roastery",
            "--door-delivery-fee",
            "2500",
            "--tax-rate-bps",
            "1100",
            "--lock-timeout-ms",
            "750",
        ])?;

        let settings = config.checkout.settings();

        assert_eq!(settings.door_delivery_fee, 2_500);
        assert_eq!(settings.tax_rate_bps, 1_100);
        assert_eq!(settings.lock_timeout, Duration::from_millis(750));

        Ok(())
    }
}
