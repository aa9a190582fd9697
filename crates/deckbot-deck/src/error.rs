//! Error types for deck composition and output

use thiserror::Error;

/// Deck composition and writing errors
#[derive(Debug, Error)]
pub enum DeckError {
    /// The fetched records cannot fill the layout
    #[error(transparent)]
    Record(#[from] deckbot_core::Error),

    /// Image bytes are in a format slides cannot embed
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// The image header could not be decoded
    #[error("Image decode error: {0}")]
    Decode(#[from] ::image::ImageError),

    /// A text pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Writing the package failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip container error
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Result type alias for deck operations
pub type Result<T> = std::result::Result<T, DeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_is_transparent() {
        let err: DeckError = deckbot_core::Error::MissingMetric("Revenue".to_string()).into();
        assert_eq!(err.to_string(), "Metric not available: Revenue");
    }
}
