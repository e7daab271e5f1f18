//! Configuration management for the client.

use std::env;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the resource API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Default page size for list operations
    pub default_page_size: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("ROSTRA_API_URL").map_err(|_| ConfigError::MissingApiUrl)?;

        let timeout_secs = env::var("ROSTRA_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let default_page_size = env::var("ROSTRA_PAGE_SIZE")
            .unwrap_or_else(|_| rostra_engine::DEFAULT_PAGE_SIZE.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPageSize)?;

        Ok(Self {
            base_url,
            timeout_secs,
            default_page_size,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ROSTRA_API_URL environment variable is required")]
    MissingApiUrl,

    #[error("Invalid ROSTRA_TIMEOUT_SECS value")]
    InvalidTimeout,

    #[error("Invalid ROSTRA_PAGE_SIZE value")]
    InvalidPageSize,
}
