//! Blending and mask compositing.
//!
//! Two composite operations build on the same final opacity step:
//!
//! - [`add_blend`] - linear dodge (`min(a + b, 1)`) mixed back over `a`
//! - [`blend_by_mask`] - per-pixel selection between `a` and `b` by an
//!   inverted mask, mixed back over `a`
//!
//! `blend_percentage` is the opacity of the blended layer: 0 returns
//! `a` unchanged, 1 returns the blended result.
//!
//! # Example
//!
//! ```rust
//! use retex_ops::blend::add_blend;
//!
//! let a = vec![0.6f32, 0.3, 0.9];
//! let b = vec![0.5f32, 0.3, 0.5];
//! let out = add_blend(&a, &b, 1.0).unwrap();
//! assert_eq!(out, vec![1.0, 0.6, 1.0]); // clamped sum
//! ```

use crate::{OpsError, OpsResult};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Linear dodge of two components: overlapping light values sum
/// toward white.
#[inline]
fn dodge(av: f32, bv: f32) -> f32 {
    (av + bv).min(1.0)
}

/// Mixes two equal-length buffers: `a * (1 - t) + b * t`.
///
/// # Errors
///
/// [`OpsError::SizeMismatch`] if the buffers differ in length,
/// [`OpsError::InvalidParameter`] if `t` is outside [0, 1].
pub fn lerp(a: &[f32], b: &[f32], t: f32) -> OpsResult<Vec<f32>> {
    if a.len() != b.len() {
        return Err(OpsError::SizeMismatch(format!(
            "a has {} values, b has {}",
            a.len(),
            b.len()
        )));
    }
    validate_fraction("mix weight", t)?;

    Ok(a.iter()
        .zip(b.iter())
        .map(|(&av, &bv)| av * (1.0 - t) + bv * t)
        .collect())
}

/// Additive blend of `b` over `a`, re-composited at
/// `blend_percentage` opacity.
///
/// The blended layer is the linear dodge `min(a + b, 1)`; the result is
/// `a * (1 - blend_percentage) + dodged * blend_percentage`.
pub fn add_blend(a: &[f32], b: &[f32], blend_percentage: f32) -> OpsResult<Vec<f32>> {
    trace!(len = a.len(), blend_percentage, "add_blend");

    if a.len() != b.len() {
        return Err(OpsError::SizeMismatch(format!(
            "a has {} values, b has {}",
            a.len(),
            b.len()
        )));
    }
    validate_fraction("blend_percentage", blend_percentage)?;

    Ok(a.iter()
        .zip(b.iter())
        .map(|(&av, &bv)| {
            let d = dodge(av, bv);
            av * (1.0 - blend_percentage) + d * blend_percentage
        })
        .collect())
}

/// Composites `a` over `b` through an inverted mask, re-composited at
/// `blend_percentage` opacity.
///
/// The mask is single-channel with the same spatial dimensions as the
/// color buffers (resample beforehand if needed). After inversion a
/// mask value of 1 selects `b` and 0 selects `a`:
///
/// ```text
/// composite = a * (1 - mask) + b * mask
/// result    = a * (1 - blend_percentage) + composite * blend_percentage
/// ```
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] / [`OpsError::SizeMismatch`] on
/// buffer-shape violations, [`OpsError::InvalidParameter`] if
/// `blend_percentage` is outside [0, 1].
pub fn blend_by_mask(
    a: &[f32],
    b: &[f32],
    mask: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    blend_percentage: f32,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, channels, blend_percentage, "blend_by_mask");

    let expected = width * height * channels;
    if a.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} values, got {}",
            expected,
            a.len()
        )));
    }
    if b.len() != a.len() {
        return Err(OpsError::SizeMismatch(format!(
            "a has {} values, b has {}",
            a.len(),
            b.len()
        )));
    }
    if mask.len() != width * height {
        return Err(OpsError::SizeMismatch(format!(
            "mask has {} values, expected {}",
            mask.len(),
            width * height
        )));
    }
    validate_fraction("blend_percentage", blend_percentage)?;

    let mut result = vec![0.0f32; expected];
    for i in 0..(width * height) {
        let m = mask[i].clamp(0.0, 1.0);
        let idx = i * channels;
        for c in 0..channels {
            let composite = a[idx + c] * (1.0 - m) + b[idx + c] * m;
            result[idx + c] = a[idx + c] * (1.0 - blend_percentage)
                + composite * blend_percentage;
        }
    }
    Ok(result)
}

/// Checks that a fractional parameter lies in [0, 1].
fn validate_fraction(name: &str, value: f32) -> OpsResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(OpsError::InvalidParameter(format!(
            "{name} must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}
