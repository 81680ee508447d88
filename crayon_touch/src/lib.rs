// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crayon Touch: a small touch event model shared by Crayon's interactive views.
//!
//! Two views in a drawing screen are interested in the same stream of touch
//! input: the drawing surface wants single-finger strokes, and the zoom
//! controller wants two-finger pans and pinches. Rather than a global gesture
//! priority flag, each view inspects the pointer count and declares whether
//! it handled the event:
//!
//! - [`TouchEvent`] carries the phase and the active pointer positions.
//! - [`TouchTarget`] is implemented by anything that consumes touch input and
//!   answers with a [`Routing`] decision.
//! - [`dispatch`] offers an event to targets in order until one claims it.
//!
//! The [`pan`] and [`pinch`] modules hold the stateful helpers used to turn a
//! two-finger stream into pan deltas and pinch scale factors.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use crayon_touch::{dispatch, Routing, TouchEvent, TouchPhase, TouchTarget};
//!
//! struct OneFinger;
//! impl TouchTarget for OneFinger {
//!     fn handle_touch(&mut self, event: &TouchEvent) -> Routing {
//!         if event.pointer_count() == 1 { Routing::Handled } else { Routing::Unhandled }
//!     }
//! }
//!
//! struct TwoFingers;
//! impl TouchTarget for TwoFingers {
//!     fn handle_touch(&mut self, event: &TouchEvent) -> Routing {
//!         if event.pointer_count() >= 2 { Routing::Handled } else { Routing::Unhandled }
//!     }
//! }
//!
//! let mut a = OneFinger;
//! let mut b = TwoFingers;
//! let pinch = TouchEvent::new(
//!     TouchPhase::PointerDown,
//!     [Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
//! );
//! assert_eq!(dispatch(&pinch, &mut [&mut a, &mut b]), Routing::Handled);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod pan;
pub mod pinch;

use kurbo::Point;
use smallvec::SmallVec;

pub use pan::PanTracker;
pub use pinch::PinchDetector;

/// Phase of a touch event within a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    /// The first pointer touched down.
    Down,
    /// An additional pointer touched down while others are active.
    PointerDown,
    /// One or more active pointers moved.
    Move,
    /// A pointer lifted while others remain active.
    PointerUp,
    /// The last pointer lifted.
    Up,
    /// The platform cancelled the gesture.
    Cancel,
}

/// A single touch event in view coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Phase of the gesture this event belongs to.
    pub phase: TouchPhase,
    /// Positions of every pointer active during this event.
    pub points: SmallVec<[Point; 2]>,
}

impl TouchEvent {
    /// Creates a new event from a phase and the active pointer positions.
    pub fn new(phase: TouchPhase, points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            phase,
            points: points.into_iter().collect(),
        }
    }

    /// Creates a single-pointer event.
    pub fn single(phase: TouchPhase, point: Point) -> Self {
        Self::new(phase, [point])
    }

    /// Number of active pointers.
    pub fn pointer_count(&self) -> usize {
        self.points.len()
    }

    /// Position of the first pointer, if any.
    pub fn primary(&self) -> Option<Point> {
        self.points.first().copied()
    }
}

/// Whether a target consumed a touch event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Routing {
    /// The target consumed the event.
    Handled,
    /// The target declined the event so another target may claim it.
    Unhandled,
}

impl Routing {
    /// Returns `true` for [`Routing::Handled`].
    pub fn is_handled(self) -> bool {
        self == Self::Handled
    }
}

/// Something that consumes touch input.
pub trait TouchTarget {
    /// Offer an event to this target.
    fn handle_touch(&mut self, event: &TouchEvent) -> Routing;
}

/// Offers `event` to each target in order, stopping at the first one that
/// handles it.
///
/// Every target before the claiming one still sees the event, so a target can
/// react to being passed over (for example by abandoning an in-progress stroke
/// when a second finger arrives).
pub fn dispatch(event: &TouchEvent, targets: &mut [&mut dyn TouchTarget]) -> Routing {
    for target in targets.iter_mut() {
        if target.handle_touch(event).is_handled() {
            return Routing::Handled;
        }
    }
    Routing::Unhandled
}

/// Midpoint of the first two pointers, or `None` with fewer than two.
pub fn midpoint(points: &[Point]) -> Option<Point> {
    match points {
        [a, b, ..] => Some(a.midpoint(*b)),
        _ => None,
    }
}

/// Distance between the first two pointers, or `None` with fewer than two.
pub fn span(points: &[Point]) -> Option<f64> {
    match points {
        [a, b, ..] => Some(a.distance(*b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        accept: usize,
        seen: u32,
    }

    impl TouchTarget for Counter {
        fn handle_touch(&mut self, event: &TouchEvent) -> Routing {
            self.seen += 1;
            if event.pointer_count() == self.accept {
                Routing::Handled
            } else {
                Routing::Unhandled
            }
        }
    }

    #[test]
    fn dispatch_stops_at_first_handler() {
        let mut first = Counter { accept: 1, seen: 0 };
        let mut second = Counter { accept: 1, seen: 0 };
        let ev = TouchEvent::single(TouchPhase::Down, Point::new(1.0, 2.0));

        let routing = dispatch(&ev, &mut [&mut first, &mut second]);

        assert_eq!(routing, Routing::Handled);
        assert_eq!(first.seen, 1);
        assert_eq!(second.seen, 0);
    }

    #[test]
    fn dispatch_falls_through_declining_targets() {
        let mut drawing = Counter { accept: 1, seen: 0 };
        let mut zoom = Counter { accept: 2, seen: 0 };
        let ev = TouchEvent::new(
            TouchPhase::PointerDown,
            [Point::new(0.0, 0.0), Point::new(4.0, 0.0)],
        );

        let routing = dispatch(&ev, &mut [&mut drawing, &mut zoom]);

        assert_eq!(routing, Routing::Handled);
        assert_eq!(drawing.seen, 1);
        assert_eq!(zoom.seen, 1);
    }

    #[test]
    fn dispatch_with_no_taker_is_unhandled() {
        let mut zoom = Counter { accept: 2, seen: 0 };
        let ev = TouchEvent::new(TouchPhase::Move, []);
        assert_eq!(dispatch(&ev, &mut [&mut zoom]), Routing::Unhandled);
    }

    #[test]
    fn midpoint_and_span_need_two_pointers() {
        assert_eq!(midpoint(&[Point::new(1.0, 1.0)]), None);
        assert_eq!(span(&[]), None);

        let pts = [
            Point::new(0.0, 0.0),
            Point::new(6.0, 8.0),
            Point::new(99.0, 99.0),
        ];
        assert_eq!(midpoint(&pts), Some(Point::new(3.0, 4.0)));
        assert!((span(&pts).unwrap() - 10.0).abs() < 1e-12);
    }
}
