// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Inclusive bounds on the zoom scale reachable by pinch gestures.
///
/// Used by [`crate::ZoomController`]. The default range is `[0.5, 4.0]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    min: f64,
    max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 0.5, max: 4.0 }
    }
}

impl ZoomLimits {
    /// Creates limits from two bounds.
    ///
    /// The bounds are normalized so that `min <= max`. Non-finite or
    /// non-positive bounds fall back to the defaults.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if !(a.is_finite() && b.is_finite() && a > 0.0 && b > 0.0) {
            return Self::default();
        }
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamps `scale` into the range.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }

    /// Returns `true` if `scale` lies within the range.
    #[must_use]
    pub fn contains(&self, scale: f64) -> bool {
        (self.min..=self.max).contains(&scale)
    }
}
