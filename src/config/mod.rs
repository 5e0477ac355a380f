pub mod app;
pub mod auth;
pub mod security;

use thiserror::Error;

pub use app::{
    ApiConfig, AppConfig, AppMetadata, DatabaseConfig, LogFormat, ObservabilityConfig,
    ServerConfig,
};
pub use auth::{Argon2Config, AuthConfig};
pub use security::{CorsConfig, SecurityConfig, SecurityHeadersConfig};

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Implemented by every configuration section
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Load the application configuration from files and environment variables
pub fn load() -> Result<AppConfig, ConfigError> {
    app::load_config()
}
