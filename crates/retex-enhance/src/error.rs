//! Error types for the enhancement transforms.

use thiserror::Error;

/// Error type for transform execution.
///
/// Parameter validation happens once per call, before any per-item
/// batch work, so a batch either fully validates or fails before any
/// processing begins.
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// A transform parameter violates its domain precondition.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Container-level failure (buffer shapes, batch lengths).
    #[error(transparent)]
    Core(#[from] retex_core::Error),

    /// Pixel-array operation failure.
    #[error(transparent)]
    Ops(#[from] retex_ops::OpsError),
}

/// Result type for transform execution.
pub type EnhanceResult<T> = Result<T, EnhanceError>;
