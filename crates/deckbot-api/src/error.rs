//! Error types for Databook API operations

use deckbot_utils::ConfigError;
use thiserror::Error;

/// Databook API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login was refused or returned no token
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The server kept answering 401 after refreshing the token
    #[error("Unauthorized for {path} after {refreshes} token refresh(es)")]
    Unauthorized { path: String, refreshes: u32 },

    /// The server did not accept the request (HTTP 500), usually an unknown company id
    #[error("The server did not accept the request for {path}")]
    Rejected { path: String },

    /// A company or metric id that cannot name a single resource
    #[error("Invalid id '{0}'")]
    InvalidId(String),

    /// Any other non-success status
    #[error("Unexpected status {status} for {path}")]
    UnexpectedStatus { status: u16, path: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
