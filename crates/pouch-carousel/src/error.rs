//! Error types for the carousel engine.

use thiserror::Error;

/// Result type for carousel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a carousel.
///
/// Navigation never fails: out-of-range jumps and video requests for records
/// without a video are ignored. Only lookups by id and configuration can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// No record with this id in the mounted collection
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration value out of range
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}
