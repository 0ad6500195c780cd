//! Error types for threadmap CLI operations.

use std::io;
use thiserror::Error;

/// The error type for threadmap CLI operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Intelligence or plan input could not be decoded.
    #[error("Invalid input '{path}': {reason}")]
    Input {
        /// File that failed to decode
        path: String,
        /// Decoder message
        reason: String,
    },

    /// Chain serialization error.
    #[error(transparent)]
    Serialization(#[from] threadmap_io::Error),
}

/// A specialized Result type for threadmap operations.
pub type Result<T> = std::result::Result<T, Error>;
