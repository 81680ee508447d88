// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture sequences against a real viewport.

use std::cell::Cell;
use std::rc::Rc;

use crayon_touch::{TouchEvent, TouchPhase, TouchTarget};
use crayon_view::{ZoomController, ZoomLimits};
use kurbo::{Point, Rect, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPS: f64 = 1e-6;

fn assert_edges_clamped(zoom: &ZoomController) {
    let Some(rect) = zoom.image_rect_in_view() else {
        return;
    };
    let vp = zoom.viewport_size();
    if rect.width() > vp.width + EPS {
        assert!(rect.x0 <= EPS, "gap at left edge: {rect:?}");
        assert!(rect.x1 >= vp.width - EPS, "gap at right edge: {rect:?}");
    }
    if rect.height() > vp.height + EPS {
        assert!(rect.y0 <= EPS, "gap at top edge: {rect:?}");
        assert!(rect.y1 >= vp.height - EPS, "gap at bottom edge: {rect:?}");
    }
}

fn random_pair(rng: &mut StdRng, vp: Size) -> [Point; 2] {
    let mut point = || {
        Point::new(
            rng.random_range(0.0..vp.width),
            rng.random_range(0.0..vp.height),
        )
    };
    [point(), point()]
}

#[test]
fn wide_image_fits_with_vertical_centering() {
    let mut zoom = ZoomController::default();
    zoom.fit_to_viewport(Size::new(2000.0, 800.0), Size::new(1000.0, 800.0));

    assert!((zoom.scale() - 0.5).abs() < 1e-12);
    let rect = zoom.image_rect_in_view().unwrap();
    assert_eq!(rect, Rect::new(0.0, 200.0, 1000.0, 600.0));
}

#[test]
fn randomized_gestures_keep_invariants() {
    let vp = Size::new(1000.0, 800.0);
    let limits = ZoomLimits::default();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    let images = [
        Size::new(2000.0, 800.0),
        Size::new(300.0, 900.0),
        Size::new(1000.0, 800.0),
    ];
    for image in images {
        let mut zoom = ZoomController::new(limits);
        zoom.fit_to_viewport(image, vp);

        for _ in 0..200 {
            let fingers = random_pair(&mut rng, vp);
            zoom.gesture_begin(&fingers);

            for _ in 0..rng.random_range(1..8) {
                let fingers = random_pair(&mut rng, vp);
                let factor = match rng.random_range(0..5) {
                    0 => None,
                    1 => Some(100.0),
                    2 => Some(0.001),
                    _ => Some(rng.random_range(0.5..2.0)),
                };
                zoom.gesture_update(&fingers, factor);

                let s = zoom.scale();
                assert!(
                    s >= limits.min() - EPS && s <= limits.max() + EPS,
                    "scale {s} escaped limits"
                );
                assert_edges_clamped(&zoom);
            }
            zoom.gesture_end();
        }
    }
}

#[test]
fn extreme_factors_land_on_limits() {
    let mut zoom = ZoomController::default();
    zoom.fit_to_viewport(Size::new(1000.0, 800.0), Size::new(1000.0, 800.0));
    let fingers = [Point::new(400.0, 400.0), Point::new(600.0, 400.0)];

    zoom.gesture_begin(&fingers);
    zoom.gesture_update(&fingers, Some(100.0));
    assert!((zoom.scale() - 4.0).abs() < 1e-12);
    assert_edges_clamped(&zoom);

    zoom.gesture_update(&fingers, Some(0.001));
    assert!((zoom.scale() - 0.5).abs() < 1e-12);
    zoom.gesture_end();
}

#[test]
fn touch_events_drive_pan_and_pinch() {
    let changes = Rc::new(Cell::new(0_usize));
    let counter = changes.clone();

    let mut zoom = ZoomController::default();
    zoom.set_listener(move |_| counter.set(counter.get() + 1));
    zoom.fit_to_viewport(Size::new(1000.0, 800.0), Size::new(1000.0, 800.0));
    assert_eq!(changes.get(), 1);

    // A single finger belongs to the drawing surface.
    let one = TouchEvent::single(TouchPhase::Down, Point::new(10.0, 10.0));
    assert!(!zoom.handle_touch(&one).is_handled());

    let down = TouchEvent::new(
        TouchPhase::PointerDown,
        [Point::new(400.0, 400.0), Point::new(500.0, 400.0)],
    );
    assert!(zoom.handle_touch(&down).is_handled());

    // Spread the fingers well past the slop: a pinch zooming in.
    let spread = TouchEvent::new(
        TouchPhase::Move,
        [Point::new(350.0, 400.0), Point::new(550.0, 400.0)],
    );
    assert!(zoom.handle_touch(&spread).is_handled());
    assert!((zoom.scale() - 2.0).abs() < 1e-9);

    let up = TouchEvent::new(
        TouchPhase::PointerUp,
        [Point::new(350.0, 400.0), Point::new(550.0, 400.0)],
    );
    assert!(zoom.handle_touch(&up).is_handled());
    assert!(changes.get() >= 2);
    assert_edges_clamped(&zoom);
}
