//! Listing error types

use thiserror::Error;

/// The listing document did not match the expected schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A record element lacks one of its required fields
    #[error("record {index} is missing its {field}")]
    MissingField { index: usize, field: &'static str },

    /// One of the fixed selectors failed to compile
    #[error("invalid selector: {0}")]
    Selector(String),
}

/// Fetching a listing page failed
#[derive(Error, Debug)]
pub enum TransportError {
    /// The server answered with a non-success status
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The request could not be completed or its body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// The page does not exist in the source
    #[error("Listing not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fetch operations
pub type Result<T> = std::result::Result<T, TransportError>;
