//! Percentile-clip contrast stretch primitives.
//!
//! Building blocks of the per-channel automatic contrast stretch:
//! find the statistical cutoffs for a channel, saturate outliers to
//! them, and rescale the survivors to fill the full intensity range.
//!
//! # Example
//!
//! ```rust
//! use retex_ops::stretch::{clip_to_bounds, normalize_min_max, percentile_bounds};
//!
//! let channel = vec![0u8, 10, 20, 200, 255];
//! let (low, high) = percentile_bounds(&channel, 0.0).unwrap();
//! assert_eq!((low, high), (0, 255)); // zero intensity keeps the extremes
//! ```

use crate::{OpsError, OpsResult};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Finds the low/high percentile cutoffs of a channel.
///
/// The channel is sorted ascending; the cutoffs are
/// `sorted[floor(n * half_percent)]` and
/// `sorted[ceil(n * (1 - half_percent))]`, with both indices clamped
/// to `[0, n - 1]`.
///
/// `half_percent` is half the stretch intensity: 0 keeps the channel
/// extremes (a no-op clip), 0.5 collapses both cutoffs onto the
/// median.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] on an empty channel,
/// [`OpsError::InvalidParameter`] if `half_percent` is outside
/// [0, 0.5].
pub fn percentile_bounds(channel: &[u8], half_percent: f32) -> OpsResult<(u8, u8)> {
    trace!(len = channel.len(), half_percent, "percentile_bounds");

    if channel.is_empty() {
        return Err(OpsError::InvalidDimensions("empty channel".into()));
    }
    if !half_percent.is_finite() || !(0.0..=0.5).contains(&half_percent) {
        return Err(OpsError::InvalidParameter(format!(
            "half_percent must be in [0, 0.5], got {half_percent}"
        )));
    }

    let mut sorted = channel.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    let low_idx = ((n as f32 * half_percent).floor() as usize).min(n - 1);
    let high_idx = ((n as f32 * (1.0 - half_percent)).ceil() as usize).min(n - 1);

    Ok((sorted[low_idx], sorted[high_idx]))
}

/// Saturates a channel to [low, high]: values below `low` become
/// `low`, values above `high` become `high`.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `low > high`.
pub fn clip_to_bounds(channel: &[u8], low: u8, high: u8) -> OpsResult<Vec<u8>> {
    if low > high {
        return Err(OpsError::InvalidParameter(format!(
            "clip bounds inverted: low {low} > high {high}"
        )));
    }
    Ok(channel.iter().map(|&v| v.clamp(low, high)).collect())
}

/// Rescales a channel so its minimum maps to 0 and its maximum to 255.
///
/// Intermediate values are rounded to the nearest integer. A constant
/// channel (min == max) is returned unchanged: collapsing it to 0
/// would turn a flat image black, so the degenerate case is the
/// identity.
pub fn normalize_min_max(channel: &[u8]) -> Vec<u8> {
    let Some(&min) = channel.iter().min() else {
        return Vec::new();
    };
    let max = *channel.iter().max().expect("non-empty channel");

    if min == max {
        return channel.to_vec();
    }

    let scale = 255.0 / f32::from(max - min);
    channel
        .iter()
        .map(|&v| (f32::from(v - min) * scale).round() as u8)
        .collect()
}
