//! Automatic color correction.
//!
//! Per-channel contrast stretch that suppresses outlier intensities
//! and rescales the remainder to fill the full range. Each of the
//! three channels is processed independently and identically:
//!
//! 1. flatten and sort the channel, find the low/high percentile
//!    cutoffs for `intensity / 2`
//! 2. saturate the channel to those cutoffs
//! 3. rescale min-max to [0, 255]
//!
//! `intensity = 0` keeps the channel extremes (the clip is a no-op);
//! `intensity = 1` collapses both cutoffs onto the median, which may
//! produce a near-constant channel but never fails.

use retex_core::{Batch, Image, CHANNELS};
use retex_ops::stretch::{clip_to_bounds, normalize_min_max, percentile_bounds};
use tracing::debug;

use crate::params::{ParamSpec, TransformSchema};
use crate::{EnhanceError, EnhanceResult};

/// Default stretch intensity.
pub const DEFAULT_INTENSITY: f32 = 0.05;

/// Per-channel percentile contrast stretch.
///
/// # Example
///
/// ```rust
/// use retex_core::Image;
/// use retex_enhance::ColorCorrection;
///
/// let image = Image::filled(8, 8, [0.2, 0.5, 0.8]);
/// let corrected = ColorCorrection::default().apply(&image).unwrap();
/// assert_eq!(corrected.dimensions(), (8, 8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCorrection {
    /// Fraction of the intensity distribution to clip away, split
    /// evenly between the dark and light tails. Domain [0, 1].
    pub intensity: f32,
}

impl Default for ColorCorrection {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_INTENSITY,
        }
    }
}

impl ColorCorrection {
    /// Creates a transform with the given intensity.
    pub fn new(intensity: f32) -> Self {
        Self { intensity }
    }

    /// Checks the parameter domain: `intensity` in [0, 1].
    pub fn validate(&self) -> EnhanceResult<()> {
        if !self.intensity.is_finite() || !(0.0..=1.0).contains(&self.intensity) {
            return Err(EnhanceError::InvalidParameter(format!(
                "intensity must be in [0, 1], got {}",
                self.intensity
            )));
        }
        Ok(())
    }

    /// Declared input schema for the host boundary.
    pub fn schema() -> TransformSchema {
        TransformSchema::new(
            "color_correction",
            vec![
                ("image", ParamSpec::image()),
                ("intensity", ParamSpec::float(0.05, 0.0, 1.0, 0.01)),
            ],
        )
    }

    /// Applies the stretch to a single image.
    pub fn apply(&self, image: &Image) -> EnhanceResult<Image> {
        self.validate()?;
        debug!(
            width = image.width(),
            height = image.height(),
            intensity = self.intensity,
            "color_correction"
        );

        let (width, height) = image.dimensions();
        let bytes = image.to_bytes();
        let half_percent = self.intensity / 2.0;

        let mut out = vec![0u8; bytes.len()];
        for c in 0..CHANNELS {
            let channel: Vec<u8> = bytes[c..].iter().step_by(CHANNELS).copied().collect();
            let (low, high) = percentile_bounds(&channel, half_percent)?;
            let clipped = clip_to_bounds(&channel, low, high)?;
            let rescaled = normalize_min_max(&clipped);
            for (i, &v) in rescaled.iter().enumerate() {
                out[i * CHANNELS + c] = v;
            }
        }

        Ok(Image::from_bytes(width, height, &out)?)
    }

    /// Applies the stretch to every image of a batch.
    ///
    /// The intensity is validated once, before any per-item work; the
    /// output batch preserves input order and length.
    pub fn apply_batch(&self, batch: &Batch<Image>) -> EnhanceResult<Batch<Image>> {
        self.validate()?;
        debug!(len = batch.len(), "color_correction batch");
        batch.try_map(|image| self.apply(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 image whose byte values already span 0..255 per channel.
    fn full_range_image() -> Image {
        Image::from_data(
            2,
            2,
            vec![
                0.0, 0.0, 0.0, //
                1.0, 1.0, 1.0, //
                0.2, 0.5, 0.8, //
                0.6, 0.3, 0.1, //
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_zero_intensity_on_full_range_image_is_identity() {
        // Clip keeps the extremes and the rescale maps 0..255 onto
        // itself, so the bytes survive unchanged.
        let image = full_range_image();
        let out = ColorCorrection::new(0.0).apply(&image).unwrap();
        assert_eq!(out.to_bytes(), image.to_bytes());
    }

    #[test]
    fn test_output_channels_fill_full_range() {
        let image = Image::from_data(
            2,
            2,
            vec![
                0.2, 0.3, 0.4, //
                0.4, 0.5, 0.6, //
                0.3, 0.4, 0.5, //
                0.35, 0.45, 0.55, //
            ],
        )
        .unwrap();
        let out = ColorCorrection::new(0.0).apply(&image).unwrap();
        let bytes = out.to_bytes();
        for c in 0..CHANNELS {
            let channel: Vec<u8> = bytes[c..].iter().step_by(CHANNELS).copied().collect();
            assert_eq!(*channel.iter().min().unwrap(), 0);
            assert_eq!(*channel.iter().max().unwrap(), 255);
        }
    }

    #[test]
    fn test_flat_image_is_stable() {
        // min == max after clipping; the degenerate fallback leaves
        // the channel untouched.
        let flat = Image::filled(4, 4, [128.0 / 255.0; 3]);
        let out = ColorCorrection::default().apply(&flat).unwrap();
        assert_eq!(out.to_bytes(), flat.to_bytes());
    }

    #[test]
    fn test_extreme_intensity_does_not_fail() {
        let image = full_range_image();
        let out = ColorCorrection::new(1.0).apply(&image).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
    }

    #[test]
    fn test_rejects_out_of_domain_intensity() {
        let image = full_range_image();
        assert!(ColorCorrection::new(1.5).apply(&image).is_err());
        assert!(ColorCorrection::new(-0.1).apply(&image).is_err());
        assert!(ColorCorrection::new(f32::NAN).apply(&image).is_err());
    }

    #[test]
    fn test_channels_are_independent() {
        // A spread in one channel must not affect a flat channel.
        let image = Image::from_data(
            2,
            1,
            vec![
                0.0, 0.5, 0.5, //
                1.0, 0.5, 0.5, //
            ],
        )
        .unwrap();
        let out = ColorCorrection::new(0.0).apply(&image).unwrap();
        let bytes = out.to_bytes();
        // Red stretched to the extremes, green/blue untouched.
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[3], 255);
        assert_eq!(bytes[1], 127);
        assert_eq!(bytes[4], 127);
    }
}
