//! # retex-core
//!
//! Core types for the retex image-enhancement pipeline.
//!
//! This crate provides the foundational types used by the rest of the
//! workspace:
//!
//! - [`Image`] - Owned RGB buffer, f32 components normalized to [0, 1]
//! - [`Mask`] - Single-channel selection mask
//! - [`Batch`] - Ordered collection with per-item dispatch
//! - [`Error`] - Core error types
//!
//! ## Design
//!
//! Images travel between two representations: the normalized float
//! form for storage and exchange, and an 8-bit integer pixel array for
//! the pixel-level algorithms. [`Image::to_bytes`] and
//! [`Image::from_bytes`] convert between them at transform boundaries,
//! clamping before truncation so the round trip never wraps.
//!
//! Batch dispatch is statically typed: a transform states which of its
//! parameters is batch-shaped by taking a [`Batch`], and
//! [`Batch::try_map`] / [`batch::zip3_try_map`] reassemble per-item
//! outputs in order. There is no runtime argument scanning.
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The other workspace crates
//! build on it:
//!
//! ```text
//! retex-core (this crate)
//!    ^
//!    |
//!    +-- retex-ops (pixel-array operations)
//!    +-- retex-enhance (transforms, schemas, batch entry points)
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - rayon-backed batch dispatch (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod batch;
pub mod error;
pub mod image;
pub mod mask;

// Re-exports for convenience
pub use batch::{zip3_try_map, Batch};
pub use error::{Error, Result};
pub use image::{Image, CHANNELS};
pub use mask::Mask;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use retex_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::batch::{zip3_try_map, Batch};
    pub use crate::error::{Error, Result};
    pub use crate::image::{Image, CHANNELS};
    pub use crate::mask::Mask;
}
