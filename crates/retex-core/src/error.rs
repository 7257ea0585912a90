//! Error types for retex-core operations.
//!
//! The [`Error`] enum covers the failure modes of the core container
//! types: buffer construction with mismatched lengths, operations that
//! require two images of the same size, and batch dispatch over
//! batches whose lengths cannot be reconciled.
//!
//! # Usage
//!
//! ```rust
//! use retex_core::{Error, Result};
//!
//! fn check_lengths(expected: usize, got: usize) -> Result<()> {
//!     if expected != got {
//!         return Err(Error::BatchLengthMismatch { expected, got });
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core container types.
#[derive(Debug, Error)]
pub enum Error {
    /// Buffer length does not match the declared dimensions.
    ///
    /// Returned by `from_data`/`from_bytes` constructors when the
    /// supplied buffer does not hold exactly `width * height * channels`
    /// elements.
    #[error("invalid dimensions {width}x{height}: {detail}")]
    InvalidDimensions {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// What went wrong
        detail: String,
    },

    /// Two images (or an image and a mask) have incompatible spatial
    /// dimensions for an operation that cannot resample.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// Expected (width, height)
        expected: (u32, u32),
        /// Actual (width, height)
        got: (u32, u32),
    },

    /// Batches passed to a zip dispatch have irreconcilable lengths.
    ///
    /// A batch of length 1 broadcasts; any other mismatch is an error,
    /// raised before any per-item work starts.
    #[error("batch length mismatch: expected {expected} items, got {got}")]
    BatchLengthMismatch {
        /// Length of the reference batch
        expected: usize,
        /// Length of the offending batch
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] with a detail message.
    pub fn invalid_dimensions(width: u32, height: u32, detail: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            detail: detail.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`].
    pub fn dimension_mismatch(expected: (u32, u32), got: (u32, u32)) -> Self {
        Self::DimensionMismatch { expected, got }
    }
}
