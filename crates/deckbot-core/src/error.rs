//! Error types for deckbot-core

use thiserror::Error;

/// Result type alias for deckbot-core
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a fetched record does not have the shape a deck needs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A metric the deck depends on is not offered for the company
    #[error("Metric not available: {0}")]
    MissingMetric(String),

    /// A metric exists but carries no usable data points
    #[error("No data for {metric}: {reason}")]
    MissingData { metric: String, reason: String },

    /// The company does not appear in its own peer comparison
    #[error("{company} is not part of the {metric} peer group")]
    CompanyNotInPeers { company: String, metric: String },

    /// A record field holds a value that cannot be used
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}
