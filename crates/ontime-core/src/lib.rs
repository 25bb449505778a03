pub mod config;
pub mod error;

pub use config::{Config, PreferencesConfig, ServiceConfig, ValidationResult};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, StorageError};

use anyhow::Result;

/// Initialize logging for the FlightOnTime client
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("FlightOnTime core initialized");
    Ok(())
}
