//! Error types for threadmap-io operations.

use std::io;
use thiserror::Error;

/// The error type for threadmap-io operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An entity in the document failed validation.
    #[error("Invalid entity '{id}': {reason}")]
    InvalidEntity {
        /// Id of the offending entity
        id: String,
        /// What was wrong with it
        reason: String,
    },

    /// The document lists the same entity id twice.
    #[error("Duplicate entity id '{0}' in document")]
    DuplicateEntity(String),

    /// The chain rejected the document's contents.
    #[error(transparent)]
    Chain(#[from] threadmap_core::Error),
}

/// A specialized Result type for threadmap-io operations.
pub type Result<T> = std::result::Result<T, Error>;
