//! Error types for the contributor harvester

use std::time::Duration;
use thiserror::Error;

/// Result type alias for harvester operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Flatten(#[from] FlattenError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised while fetching the contributor tree from the API
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Authentication failed. Check the Trove API key (TROVE_API_KEY or config file).")]
    Unauthorized,

    #[error("Access denied. The API key is not permitted to read contributors.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Giving up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Whether the failure may succeed if the request is repeated
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::ServerError(_) | FetchError::Network(_) | FetchError::RateLimit(_)
        )
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            FetchError::Network("Failed to connect to API".to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Structural defects found while flattening the contributor tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlattenError {
    #[error("Contributor {node_id} is missing required field '{field}'")]
    MissingField {
        node_id: String,
        field: &'static str,
    },

    #[error("Contributor {node_id} has invalid totalHoldings '{value}': {reason}")]
    Parse {
        node_id: String,
        value: String,
        reason: String,
    },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(
        "API key not configured. Set TROVE_API_KEY, pass --api-key, or add api_key to the config file."
    )]
    MissingApiKey,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
