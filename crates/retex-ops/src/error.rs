//! Error types for pixel-array operations.

use thiserror::Error;

/// Error type for pixel-array operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Buffers have incompatible sizes.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Parameter violates an operation's domain precondition.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for pixel-array operations.
pub type OpsResult<T> = Result<T, OpsError>;
