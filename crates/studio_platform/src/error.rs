//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The view could not be set up on this platform
    #[error("Platform initialization failed: {0}")]
    InitFailed(String),

    /// The host environment has no window or document
    #[error("Platform not available: {0}")]
    Unavailable(String),

    /// A host element the view was asked to attach to does not exist
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A platform call was rejected by the host
    #[error("Platform call failed: {0}")]
    Script(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
