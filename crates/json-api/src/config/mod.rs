//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    logging::LoggingConfig,
    observability::ObservabilityConfig,
    server::ServerRuntimeConfig,
    sessions::SessionConfig,
};

pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod sessions;

/// Quire JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "quire-json", about = "Quire JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session lifetime and cookie settings.
    #[command(flatten)]
    pub sessions: SessionConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // A missing .env file is fine
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
