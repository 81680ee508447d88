// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinch detection: derive per-update scale factors from finger span changes.
//!
//! A two-finger gesture starts out as a pan. Once the distance between the
//! fingers has changed by more than a slop fraction of the starting distance,
//! the gesture is considered a pinch, and every following update reports the
//! ratio between the current and the previous span.
//!
//! ```
//! use crayon_touch::pinch::PinchDetector;
//!
//! let mut pinch = PinchDetector::default();
//! pinch.begin(100.0);
//! // Within the slop: still a pan.
//! assert_eq!(pinch.update(101.0), None);
//! // Past the slop: a pinch, reported relative to the previous span.
//! let factor = pinch.update(120.0).unwrap();
//! assert!((factor - 120.0 / 101.0).abs() < 1e-12);
//! ```

/// Default fraction of the starting span the fingers must travel before a
/// gesture counts as a pinch.
pub const DEFAULT_PINCH_SLOP: f64 = 0.02;

/// Spans shorter than this (in view units) are too noisy to derive a ratio from.
const MIN_SPAN: f64 = 1.0;

/// Tracks finger span across a two-finger gesture.
#[derive(Debug, Clone, Copy)]
pub struct PinchDetector {
    slop: f64,
    start_span: Option<f64>,
    last_span: Option<f64>,
    in_progress: bool,
}

impl Default for PinchDetector {
    fn default() -> Self {
        Self::with_slop(DEFAULT_PINCH_SLOP)
    }
}

impl PinchDetector {
    /// Creates a detector with a custom slop fraction.
    ///
    /// Negative or non-finite values fall back to zero, which makes every
    /// span change a pinch.
    pub fn with_slop(slop: f64) -> Self {
        let slop = if slop.is_finite() { slop.max(0.0) } else { 0.0 };
        Self {
            slop,
            start_span: None,
            last_span: None,
            in_progress: false,
        }
    }

    /// Starts tracking a new two-finger gesture with the given span.
    pub fn begin(&mut self, span: f64) {
        if span < MIN_SPAN {
            self.end();
            return;
        }
        self.start_span = Some(span);
        self.last_span = Some(span);
        self.in_progress = false;
    }

    /// Feeds a new span, returning the scale factor since the previous update
    /// once the gesture has become a pinch.
    pub fn update(&mut self, span: f64) -> Option<f64> {
        let (Some(start), Some(last)) = (self.start_span, self.last_span) else {
            // Late start: the fingers were too close together at `begin`.
            self.begin(span);
            return None;
        };
        if span < MIN_SPAN {
            return None;
        }
        self.last_span = Some(span);
        if !self.in_progress {
            if ((span - start) / start).abs() <= self.slop {
                return None;
            }
            self.in_progress = true;
        }
        Some(span / last)
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        self.start_span = None;
        self.last_span = None;
        self.in_progress = false;
    }

    /// Returns `true` once the current gesture has been recognized as a pinch.
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_span_changes_stay_pans() {
        let mut pinch = PinchDetector::default();
        pinch.begin(200.0);
        assert_eq!(pinch.update(201.0), None);
        assert_eq!(pinch.update(198.0), None);
        assert!(!pinch.is_in_progress());
    }

    #[test]
    fn factors_are_relative_to_previous_update() {
        let mut pinch = PinchDetector::with_slop(0.0);
        pinch.begin(100.0);
        let f1 = pinch.update(200.0).unwrap();
        let f2 = pinch.update(100.0).unwrap();
        assert!((f1 - 2.0).abs() < 1e-12);
        assert!((f2 - 0.5).abs() < 1e-12);
        assert!(pinch.is_in_progress());
    }

    #[test]
    fn once_pinching_small_changes_still_report() {
        let mut pinch = PinchDetector::default();
        pinch.begin(100.0);
        assert!(pinch.update(150.0).is_some());
        let f = pinch.update(150.5).unwrap();
        assert!((f - 150.5 / 150.0).abs() < 1e-12);
    }

    #[test]
    fn tiny_spans_are_ignored() {
        let mut pinch = PinchDetector::with_slop(0.0);
        pinch.begin(0.1);
        assert_eq!(pinch.update(0.2), None);
        assert_eq!(pinch.update(50.0), None);
        // The update at 50.0 acted as a late start.
        assert!((pinch.update(100.0).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn end_resets() {
        let mut pinch = PinchDetector::with_slop(0.0);
        pinch.begin(100.0);
        pinch.update(300.0);
        pinch.end();
        assert!(!pinch.is_in_progress());
    }
}
