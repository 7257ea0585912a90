//! # retex-enhance
//!
//! The two enhancement transforms of the retex pipeline, batch-ready.
//!
//! - [`ColorCorrection`] - per-channel percentile contrast stretch
//! - [`DetailRestoration`] - frequency-separation detail transfer with
//!   a final tonal remap
//!
//! Both transforms are pure: they validate their parameters once per
//! call, convert to the pixel-array form at their boundaries, own
//! every intermediate buffer they allocate, and return fresh images.
//! Batch entry points (`apply_batch`) dispatch per item through
//! [`retex_core::Batch`], preserving order and length; per-item calls
//! are independent and may run in parallel without changing the
//! result.
//!
//! Each transform also declares its input schema
//! ([`ColorCorrection::schema`], [`DetailRestoration::schema`]) so a
//! host runtime can introspect and validate arguments before calling
//! in (see [`params`]).
//!
//! # Example
//!
//! ```rust
//! use retex_core::{Batch, Image};
//! use retex_enhance::ColorCorrection;
//!
//! let batch = Batch::from_vec(vec![
//!     Image::filled(8, 8, [0.3, 0.5, 0.7]),
//!     Image::filled(4, 4, [0.2, 0.2, 0.9]),
//! ]);
//! let corrected = ColorCorrection::default().apply_batch(&batch).unwrap();
//! assert_eq!(corrected.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod color_correction;
pub mod detail_restoration;
pub mod params;

pub use color_correction::{ColorCorrection, DEFAULT_INTENSITY};
pub use detail_restoration::{extract_details, DetailRestoration};
pub use error::{EnhanceError, EnhanceResult};
pub use params::{InputSpec, ParamKind, ParamSpec, TransformSchema};
