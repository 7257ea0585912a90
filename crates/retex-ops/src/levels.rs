//! Tonal level remapping with gamma-correct midpoint placement.
//!
//! [`Levels`] clips below the black level, linearly rescales
//! [black, white] to the full [0, 255] range, then applies a gamma
//! chosen so the mid level lands on mid-gray:
//!
//! ```text
//! gamma = ln(0.5) / ln((mid - black) / (white - black))
//! v'    = (v / 255)^gamma * 255
//! ```
//!
//! The black/white endpoints are unaffected by the gamma; only the
//! mid-tone shifts.
//!
//! # Example
//!
//! ```rust
//! use retex_ops::levels::Levels;
//!
//! let levels = Levels::new(80.0, 130.0, 180.0);
//! let out = levels.apply(&[80, 130, 180]).unwrap();
//! assert_eq!(out, vec![0, 127, 255]);
//! ```

use crate::{OpsError, OpsResult};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Level remap parameters in the 0-255 intensity domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    /// Input level mapped to 0; everything below is clipped.
    pub black: f32,
    /// Input level mapped to mid-gray by the gamma step.
    pub mid: f32,
    /// Input level mapped to 255; everything above saturates.
    pub white: f32,
}

impl Levels {
    /// Creates a level remap. Call [`validate`](Self::validate) (or
    /// [`apply`](Self::apply), which validates) before trusting the
    /// gamma.
    pub fn new(black: f32, mid: f32, white: f32) -> Self {
        Self { black, mid, white }
    }

    /// Checks the domain precondition `black < mid < white`.
    ///
    /// Without it the gamma is undefined (log of a non-positive or
    /// unit ratio), so violations are rejected here instead of letting
    /// a non-finite exponent propagate.
    pub fn validate(&self) -> OpsResult<()> {
        for (name, v) in [
            ("black", self.black),
            ("mid", self.mid),
            ("white", self.white),
        ] {
            if !v.is_finite() {
                return Err(OpsError::InvalidParameter(format!(
                    "{name} level must be finite, got {v}"
                )));
            }
        }
        if !(self.black < self.mid && self.mid < self.white) {
            return Err(OpsError::InvalidParameter(format!(
                "levels must satisfy black < mid < white, got {} / {} / {}",
                self.black, self.mid, self.white
            )));
        }
        Ok(())
    }

    /// Returns the gamma exponent that maps `mid` to mid-gray.
    ///
    /// Finite for any parameter set accepted by
    /// [`validate`](Self::validate).
    pub fn gamma(&self) -> f32 {
        let ratio = (self.mid - self.black) / (self.white - self.black);
        (0.5f32).ln() / ratio.ln()
    }

    /// Applies the remap to an 8-bit pixel array.
    ///
    /// Values are processed in f32 and truncated back to the integer
    /// grid at the end.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if the levels violate
    /// `black < mid < white`.
    pub fn apply(&self, src: &[u8]) -> OpsResult<Vec<u8>> {
        trace!(
            black = self.black,
            mid = self.mid,
            white = self.white,
            len = src.len(),
            "apply_levels"
        );
        self.validate()?;

        let gamma = self.gamma();
        let range = self.white - self.black;

        Ok(src
            .iter()
            .map(|&b| {
                let v = f32::from(b).max(self.black);
                let scaled = ((v - self.black) / range * 255.0).clamp(0.0, 255.0);
                ((scaled / 255.0).powf(gamma) * 255.0) as u8
            })
            .collect())
    }
}
