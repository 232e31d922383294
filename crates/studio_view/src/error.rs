//! Gallery error types

use std::path::PathBuf;

use thiserror::Error;

use crate::state::LoadState;

/// Configuration could not be read or is unusable
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field has a value the gallery cannot work with
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gallery errors
#[derive(Error, Debug)]
pub enum ViewError {
    /// An operation was requested in a state that does not allow it
    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: LoadState,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for gallery operations
pub type Result<T> = std::result::Result<T, ViewError>;
