//! Detail restoration by frequency separation.
//!
//! Transfers fine texture from a `source` image onto a `destination`
//! image within regions selected by a `mask`, preserving the
//! destination's overall tonal structure:
//!
//! 1. blur the destination (the low-frequency base)
//! 2. extract a detail layer from source and destination via an
//!    unsharp-mask construction ([`extract_details`])
//! 3. combine the two detail layers through the mask
//! 4. blend the combined details over the blurred base
//! 5. remap tone with a black/mid/white level adjustment
//!
//! Intermediates stay in the normalized float form; quantization to
//! the integer grid happens once, at the level remap that produces
//! the output.

use retex_core::{zip3_try_map, Batch, Error as CoreError, Image, Mask, CHANNELS};
use retex_ops::blend::{add_blend, blend_by_mask};
use retex_ops::blur::gaussian_blur;
use retex_ops::invert::invert;
use retex_ops::resize::resize_bilinear;
use retex_ops::Levels;
use tracing::debug;

use crate::params::{ParamSpec, TransformSchema};
use crate::{EnhanceError, EnhanceResult};

/// Blur radius shared by the low-frequency base and detail extraction.
pub const DETAIL_BLUR_RADIUS: f32 = 5.0;

/// Opacity of the blurred layer inside [`extract_details`].
pub const DETAIL_BLEND: f32 = 0.5;

/// Opacity of the combined detail layer over the blurred base.
pub const RECOMBINE_BLEND: f32 = 0.65;

/// Final level remap: black, mid, white.
pub const OUTPUT_LEVELS: (f32, f32, f32) = (80.0, 130.0, 180.0);

/// Isolates a detail layer: high-frequency structure relative to a
/// blurred low-frequency base, via an unsharp-mask construction.
///
/// Invert the image, blur the non-inverted image, additively blend
/// the inverted image with the blurred one at `blend_percentage`,
/// and invert the result.
pub fn extract_details(
    image: &Image,
    blur_radius: f32,
    blend_percentage: f32,
) -> EnhanceResult<Image> {
    let (width, height) = image.dimensions();
    let inverted = invert(image.data());
    let blurred = gaussian_blur(
        image.data(),
        width as usize,
        height as usize,
        CHANNELS,
        blur_radius,
    )?;
    let blended = add_blend(&inverted, &blurred, blend_percentage)?;
    Ok(Image::from_data(width, height, invert(&blended))?)
}

/// Masked frequency-separation detail transfer.
///
/// # Example
///
/// ```rust
/// use retex_core::{Image, Mask};
/// use retex_enhance::DetailRestoration;
///
/// let destination = Image::filled(16, 16, [0.5, 0.5, 0.5]);
/// let source = Image::filled(16, 16, [0.5, 0.5, 0.5]);
/// let mask = Mask::filled(16, 16, 0.0);
///
/// let out = DetailRestoration::default()
///     .apply(&destination, &source, &mask)
///     .unwrap();
/// assert_eq!(out.dimensions(), (16, 16));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailRestoration {
    /// Gaussian blur radius for the base and detail extraction.
    pub blur_radius: f32,
    /// Detail-extraction blend opacity.
    pub detail_blend: f32,
    /// Opacity of the combined details over the blurred base.
    pub recombine_blend: f32,
    /// Final tonal remap.
    pub levels: Levels,
}

impl Default for DetailRestoration {
    fn default() -> Self {
        let (black, mid, white) = OUTPUT_LEVELS;
        Self {
            blur_radius: DETAIL_BLUR_RADIUS,
            detail_blend: DETAIL_BLEND,
            recombine_blend: RECOMBINE_BLEND,
            levels: Levels::new(black, mid, white),
        }
    }
}

impl DetailRestoration {
    /// Checks every parameter domain before any pixel work.
    pub fn validate(&self) -> EnhanceResult<()> {
        if !self.blur_radius.is_finite() || self.blur_radius < 0.0 {
            return Err(EnhanceError::InvalidParameter(format!(
                "blur_radius must be finite and >= 0, got {}",
                self.blur_radius
            )));
        }
        for (name, v) in [
            ("detail_blend", self.detail_blend),
            ("recombine_blend", self.recombine_blend),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(EnhanceError::InvalidParameter(format!(
                    "{name} must be in [0, 1], got {v}"
                )));
            }
        }
        self.levels.validate()?;
        Ok(())
    }

    /// Declared input schema for the host boundary.
    pub fn schema() -> TransformSchema {
        TransformSchema::new(
            "detail_restoration",
            vec![
                ("destination", ParamSpec::image()),
                ("source", ParamSpec::image()),
                ("mask", ParamSpec::mask()),
            ],
        )
    }

    /// Runs the pipeline for a single destination/source/mask triple.
    ///
    /// The mask is resampled to the destination's spatial dimensions;
    /// destination and source must already agree.
    ///
    /// # Errors
    ///
    /// [`EnhanceError::InvalidParameter`] on parameter-domain
    /// violations, a dimension mismatch error if source and
    /// destination disagree on size.
    pub fn apply(
        &self,
        destination: &Image,
        source: &Image,
        mask: &Mask,
    ) -> EnhanceResult<Image> {
        self.validate()?;
        debug!(
            width = destination.width(),
            height = destination.height(),
            blur_radius = self.blur_radius,
            "detail_restoration"
        );

        if source.dimensions() != destination.dimensions() {
            return Err(CoreError::dimension_mismatch(
                destination.dimensions(),
                source.dimensions(),
            )
            .into());
        }

        let (width, height) = destination.dimensions();
        let (w, h) = (width as usize, height as usize);

        let blurred_destination =
            gaussian_blur(destination.data(), w, h, CHANNELS, self.blur_radius)?;

        let source_details = extract_details(source, self.blur_radius, self.detail_blend)?;
        let destination_details =
            extract_details(destination, self.blur_radius, self.detail_blend)?;

        let resampled_mask = resize_bilinear(
            mask.data(),
            mask.width() as usize,
            mask.height() as usize,
            1,
            w,
            h,
        )?;
        let combined_details = blend_by_mask(
            destination_details.data(),
            source_details.data(),
            &resampled_mask,
            w,
            h,
            CHANNELS,
            1.0,
        )?;

        let blended = add_blend(&blurred_destination, &combined_details, self.recombine_blend)?;

        let bytes = Image::from_data(width, height, blended)?.to_bytes();
        let remapped = self.levels.apply(&bytes)?;
        Ok(Image::from_bytes(width, height, &remapped)?)
    }

    /// Runs the pipeline over batches.
    ///
    /// The three batches are zipped elementwise; a batch of length 1
    /// broadcasts its item, any other length mismatch fails before any
    /// per-item work. Parameters are validated once up front.
    pub fn apply_batch(
        &self,
        destinations: &Batch<Image>,
        sources: &Batch<Image>,
        masks: &Batch<Mask>,
    ) -> EnhanceResult<Batch<Image>> {
        self.validate()?;
        debug!(len = destinations.len(), "detail_restoration batch");
        zip3_try_map(destinations, sources, masks, |dest, src, mask| {
            self.apply(dest, src, mask)
        })
    }
}
