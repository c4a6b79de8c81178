//! Core error types.

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors produced by the core value-type constructors
#[derive(Debug, Error)]
pub enum CoreError {
    /// A byte slice had the wrong length for a fixed-size type
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected number of bytes
        expected: usize,
        /// Number of bytes actually supplied
        actual: usize,
    },

    /// A hex string could not be decoded
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for CoreError {
    fn from(err: hex::FromHexError) -> Self {
        CoreError::InvalidHex(err.to_string())
    }
}
