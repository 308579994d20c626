//! Error types for the testimonial content store.

use thiserror::Error;

/// Result type for content store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading testimonial content.
#[derive(Debug, Error)]
pub enum Error {
    /// Two records share the same identifier
    #[error("duplicate testimonial id: {0}")]
    DuplicateId(String),

    /// A record has a blank identifier
    #[error("testimonial at position {0} has an empty id")]
    EmptyId(usize),

    /// Overrides document was not a JSON object
    #[error("invalid overrides document: {0}")]
    InvalidOverrides(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
