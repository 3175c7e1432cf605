//! Listener Config

use clap::Args;

/// Address the checkout API listens on.
#[derive(Debug, Args)]
pub struct ListenConfig {
    /// Interface to bind
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port to bind
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,
}

impl ListenConfig {
    /// `host:port` string accepted by salvo's `TcpListener`.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
