//! Isotropic gaussian blur.
//!
//! Separable two-pass implementation: a 1-D gaussian kernel is applied
//! horizontally, then vertically, with edge clamping. The `radius`
//! parameter is the standard deviation of the kernel in pixels; the
//! kernel extends three standard deviations each side.
//!
//! # Example
//!
//! ```rust
//! use retex_ops::blur::gaussian_blur;
//!
//! let src = vec![0.5f32; 16 * 16 * 3];
//! let blurred = gaussian_blur(&src, 16, 16, 3, 2.0).unwrap();
//! assert_eq!(blurred.len(), src.len());
//! ```

use crate::{OpsError, OpsResult};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Applies an isotropic gaussian blur.
///
/// # Arguments
///
/// * `src` - Source pixel data
/// * `width` - Image width
/// * `height` - Image height
/// * `channels` - Number of channels
/// * `radius` - Blur radius (kernel standard deviation, in pixels)
///
/// A radius of zero is the identity.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if the buffer does not match the
/// dimensions, [`OpsError::InvalidParameter`] if `radius` is negative
/// or not finite.
pub fn gaussian_blur(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: f32,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, channels, radius, "gaussian_blur");

    if width == 0 || height == 0 || channels == 0 {
        return Err(OpsError::InvalidDimensions(
            "width, height, and channels must be > 0".into(),
        ));
    }
    let expected = width * height * channels;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} values, got {}",
            expected,
            src.len()
        )));
    }
    if !radius.is_finite() || radius < 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "blur radius must be finite and >= 0, got {radius}"
        )));
    }
    if radius == 0.0 {
        return Ok(src.to_vec());
    }

    let weights = gaussian_weights(radius);
    let temp = blur_pass_horizontal(src, width, height, channels, &weights);
    Ok(blur_pass_vertical(&temp, width, height, channels, &weights))
}

/// Builds the normalized 1-D gaussian kernel for a given sigma.
fn gaussian_weights(sigma: f32) -> Vec<f32> {
    let half = (3.0 * sigma).ceil().max(1.0) as usize;
    let sigma2 = 2.0 * sigma * sigma;

    let mut data = Vec::with_capacity(2 * half + 1);
    let mut sum = 0.0f32;
    for i in -(half as isize)..=(half as isize) {
        let d = (i * i) as f32;
        let w = (-d / sigma2).exp();
        data.push(w);
        sum += w;
    }
    for w in &mut data {
        *w /= sum;
    }
    data
}

/// Horizontal blur pass with edge clamping.
fn blur_pass_horizontal(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    weights: &[f32],
) -> Vec<f32> {
    let half = (weights.len() / 2) as isize;
    let mut dst = vec![0.0f32; src.len()];

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (k, &w) in weights.iter().enumerate() {
                    let sx = (x as isize + k as isize - half)
                        .max(0)
                        .min(width as isize - 1) as usize;
                    sum += src[(y * width + sx) * channels + c] * w;
                }
                dst[(y * width + x) * channels + c] = sum;
            }
        }
    }

    dst
}

/// Vertical blur pass with edge clamping.
fn blur_pass_vertical(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    weights: &[f32],
) -> Vec<f32> {
    let half = (weights.len() / 2) as isize;
    let mut dst = vec![0.0f32; src.len()];

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (k, &w) in weights.iter().enumerate() {
                    let sy = (y as isize + k as isize - half)
                        .max(0)
                        .min(height as isize - 1) as usize;
                    sum += src[(sy * width + x) * channels + c] * w;
                }
                dst[(y * width + x) * channels + c] = sum;
            }
        }
    }

    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weights_normalized() {
        for sigma in [0.5f32, 1.0, 2.5, 5.0] {
            let w = gaussian_weights(sigma);
            let sum: f32 = w.iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
            // Center is the largest weight
            let center = w[w.len() / 2];
            assert!(w.iter().all(|&v| v <= center));
        }
    }

    #[test]
    fn test_blur_constant_invariant() {
        let src = vec![0.5f32; 16 * 16 * 3];
        let result = gaussian_blur(&src, 16, 16, 3, 2.0).unwrap();
        for v in result {
            assert_relative_eq!(v, 0.5, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_blur_zero_radius_identity() {
        let src: Vec<f32> = (0..8 * 8 * 3).map(|i| (i % 7) as f32 / 7.0).collect();
        let result = gaussian_blur(&src, 8, 8, 3, 0.0).unwrap();
        assert_eq!(result, src);
    }

    #[test]
    fn test_blur_impulse_symmetric() {
        // Impulse in the center of a single-channel image blurs
        // symmetrically.
        let mut src = vec![0.0f32; 9 * 9];
        src[4 * 9 + 4] = 1.0;
        let result = gaussian_blur(&src, 9, 9, 1, 1.0).unwrap();
        assert!((result[4 * 9 + 3] - result[4 * 9 + 5]).abs() < 1e-6);
        assert!((result[3 * 9 + 4] - result[5 * 9 + 4]).abs() < 1e-6);
        // Energy is preserved away from edges
        let sum: f32 = result.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_blur_rejects_negative_radius() {
        let src = vec![0.0f32; 4 * 4 * 3];
        assert!(gaussian_blur(&src, 4, 4, 3, -1.0).is_err());
    }

    #[test]
    fn test_blur_rejects_bad_buffer() {
        let src = vec![0.0f32; 10];
        assert!(gaussian_blur(&src, 4, 4, 3, 1.0).is_err());
    }
}
