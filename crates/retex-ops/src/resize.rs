//! Bilinear resampling.
//!
//! Separable two-pass triangle-filter resize, used to bring a mask to
//! its paired image's spatial dimensions before masked compositing.
//!
//! # Example
//!
//! ```rust
//! use retex_ops::resize::resize_bilinear;
//!
//! let src = vec![0.5f32; 16 * 16];
//! let dst = resize_bilinear(&src, 16, 16, 1, 32, 32).unwrap();
//! assert_eq!(dst.len(), 32 * 32);
//! ```

use crate::{OpsError, OpsResult};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Triangle (bilinear) weight function.
#[inline]
fn triangle_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Resizes pixel data with bilinear interpolation.
///
/// # Arguments
///
/// * `src` - Source pixel data
/// * `src_w` - Source width
/// * `src_h` - Source height
/// * `channels` - Number of channels (1 for masks, 3 for images)
/// * `dst_w` - Destination width
/// * `dst_h` - Destination height
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if the source buffer does not match
/// its dimensions or the destination size is zero.
pub fn resize_bilinear(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
) -> OpsResult<Vec<f32>> {
    trace!(src_w, src_h, channels, dst_w, dst_h, "resize_bilinear");

    let expected = src_w * src_h * channels;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} values, got {}",
            expected,
            src.len()
        )));
    }
    if src_w == 0 || src_h == 0 {
        return Err(OpsError::InvalidDimensions("source size must be > 0".into()));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(
            "destination size must be > 0".into(),
        ));
    }

    if src_w == dst_w && src_h == dst_h {
        return Ok(src.to_vec());
    }

    // Two-pass separable resize: horizontal then vertical
    let temp = resize_horizontal(src, src_w, src_h, channels, dst_w);
    Ok(resize_vertical(&temp, dst_w, src_h, channels, dst_h))
}

/// Horizontal resize pass.
fn resize_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; dst_w * src_h * channels];
    let scale = src_w as f32 / dst_w as f32;
    let support = scale.max(1.0);

    for y in 0..src_h {
        for x in 0..dst_w {
            // Map destination x to source x
            let center = (x as f32 + 0.5) * scale - 0.5;
            let left = ((center - support).floor() as isize).max(0) as usize;
            let right = ((center + support).ceil() as usize).min(src_w - 1);

            let mut sum = vec![0.0f32; channels];
            let mut weight_sum = 0.0f32;

            for sx in left..=right {
                let dist = (sx as f32 - center) / scale.max(1.0);
                let w = triangle_weight(dist);
                weight_sum += w;

                let src_idx = (y * src_w + sx) * channels;
                for c in 0..channels {
                    sum[c] += src[src_idx + c] * w;
                }
            }

            let dst_idx = (y * dst_w + x) * channels;
            if weight_sum > 0.0 {
                for c in 0..channels {
                    dst[dst_idx + c] = sum[c] / weight_sum;
                }
            }
        }
    }

    dst
}

/// Vertical resize pass.
fn resize_vertical(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_h: usize,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; src_w * dst_h * channels];
    let scale = src_h as f32 / dst_h as f32;
    let support = scale.max(1.0);

    for y in 0..dst_h {
        let center = (y as f32 + 0.5) * scale - 0.5;
        let top = ((center - support).floor() as isize).max(0) as usize;
        let bottom = ((center + support).ceil() as usize).min(src_h - 1);

        for x in 0..src_w {
            let mut sum = vec![0.0f32; channels];
            let mut weight_sum = 0.0f32;

            for sy in top..=bottom {
                let dist = (sy as f32 - center) / scale.max(1.0);
                let w = triangle_weight(dist);
                weight_sum += w;

                let src_idx = (sy * src_w + x) * channels;
                for c in 0..channels {
                    sum[c] += src[src_idx + c] * w;
                }
            }

            let dst_idx = (y * src_w + x) * channels;
            if weight_sum > 0.0 {
                for c in 0..channels {
                    dst[dst_idx + c] = sum[c] / weight_sum;
                }
            }
        }
    }

    dst
}
