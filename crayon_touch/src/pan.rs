// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger pan tracking: turn successive gesture midpoints into pan deltas.
//!
//! ## Usage
//!
//! 1) When the second finger lands, call [`PanTracker::start`] with the
//!    midpoint of the two fingers.
//! 2) On each move, call [`PanTracker::update`] with the new midpoint to get
//!    the delta since the previous midpoint.
//! 3) When a finger lifts, call [`PanTracker::end`].
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use crayon_touch::pan::PanTracker;
//!
//! let mut pan = PanTracker::default();
//! pan.start(Point::new(100.0, 100.0));
//! assert_eq!(pan.update(Point::new(110.0, 95.0)), Some(Vec2::new(10.0, -5.0)));
//! pan.end();
//! assert!(!pan.is_tracking());
//! ```

use kurbo::{Point, Vec2};

/// Tracks the reference midpoint of an ongoing two-finger pan.
#[derive(Debug, Clone, Default, Copy)]
pub struct PanTracker {
    /// Midpoint at the previous update, while a pan is active.
    pub last_midpoint: Option<Point>,
}

impl PanTracker {
    /// Start tracking a pan from the given midpoint.
    pub fn start(&mut self, midpoint: Point) {
        self.last_midpoint = Some(midpoint);
    }

    /// Record a new midpoint, returning the movement since the last one.
    ///
    /// Returns `None` when no pan is being tracked.
    pub fn update(&mut self, midpoint: Point) -> Option<Vec2> {
        let last = self.last_midpoint?;
        self.last_midpoint = Some(midpoint);
        Some(midpoint - last)
    }

    /// Stop tracking.
    pub fn end(&mut self) {
        self.last_midpoint = None;
    }

    /// Returns `true` while a pan is being tracked.
    pub fn is_tracking(&self) -> bool {
        self.last_midpoint.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tracker_is_idle() {
        let pan = PanTracker::default();
        assert!(!pan.is_tracking());
    }

    #[test]
    fn update_without_start_returns_none() {
        let mut pan = PanTracker::default();
        assert_eq!(pan.update(Point::new(5.0, 5.0)), None);
        assert!(pan.last_midpoint.is_none());
    }

    #[test]
    fn updates_are_incremental() {
        let mut pan = PanTracker::default();
        pan.start(Point::new(0.0, 0.0));

        assert_eq!(pan.update(Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(pan.update(Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(pan.update(Point::new(8.0, 7.0)), Some(Vec2::ZERO));
    }

    #[test]
    fn restart_replaces_reference() {
        let mut pan = PanTracker::default();
        pan.start(Point::new(0.0, 0.0));
        pan.update(Point::new(50.0, 50.0));

        // A new second-finger landing must not produce a jump.
        pan.start(Point::new(200.0, 200.0));
        assert_eq!(
            pan.update(Point::new(201.0, 200.0)),
            Some(Vec2::new(1.0, 0.0))
        );
    }

    #[test]
    fn end_resets_state() {
        let mut pan = PanTracker::default();
        pan.start(Point::new(10.0, 20.0));
        pan.end();
        assert!(!pan.is_tracking());
        assert_eq!(pan.update(Point::new(11.0, 20.0)), None);
    }
}
