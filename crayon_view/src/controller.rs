// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use crayon_touch::{PanTracker, PinchDetector, Routing, TouchEvent, TouchPhase, TouchTarget};
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::limits::ZoomLimits;

type TransformListener = Box<dyn FnMut(Affine)>;

/// Pan/zoom controller for an image displayed in a viewport.
///
/// `ZoomController` owns the image-to-view transform. Every operation that
/// changes it re-applies edge clamping and then reports the new transform
/// to the listener exactly once, synchronously, as a copy.
pub struct ZoomController {
    viewport: Size,
    image: Option<Size>,
    transform: Affine,
    scale: f64,
    limits: ZoomLimits,
    pending_fit: Option<Size>,
    pan: PanTracker,
    pinch: PinchDetector,
    listener: Option<TransformListener>,
}

impl fmt::Debug for ZoomController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomController")
            .field("viewport", &self.viewport)
            .field("image", &self.image)
            .field("transform", &self.transform)
            .field("scale", &self.scale)
            .field("limits", &self.limits)
            .field("pending_fit", &self.pending_fit)
            .field("pan", &self.pan)
            .field("pinch", &self.pinch)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

impl ZoomController {
    /// Creates a controller with an identity transform and no image.
    #[must_use]
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            viewport: Size::ZERO,
            image: None,
            transform: Affine::IDENTITY,
            scale: 1.0,
            limits,
            pending_fit: None,
            pan: PanTracker::default(),
            pinch: PinchDetector::default(),
            listener: None,
        }
    }

    /// Installs the change listener, replacing any previous one.
    ///
    /// The listener receives a snapshot of the transform after every change.
    pub fn set_listener(&mut self, listener: impl FnMut(Affine) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Removes the change listener.
    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Current image-to-view transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Current uniform scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Zoom limits applied to pinch gestures.
    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Last known viewport size.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Intrinsic size of the displayed image, if one has been fitted.
    #[must_use]
    pub fn image_size(&self) -> Option<Size> {
        self.image
    }

    /// Bounding box of the image in view coordinates.
    #[must_use]
    pub fn image_rect_in_view(&self) -> Option<Rect> {
        let image = self.image?;
        Some(
            self.transform
                .transform_rect_bbox(Rect::from_origin_size(Point::ORIGIN, image)),
        )
    }

    /// Maps a view-space point into image coordinates.
    #[must_use]
    pub fn view_to_image(&self, pt: Point) -> Point {
        self.transform.inverse() * pt
    }

    /// Replaces the zoom limits.
    ///
    /// If the current scale falls outside the new range, the image is
    /// rescaled about the viewport center into range and clamped.
    pub fn set_limits(&mut self, limits: ZoomLimits) {
        self.limits = limits;
        if limits.contains(self.scale) {
            return;
        }
        let focal = (self.viewport.to_vec2() / 2.0).to_point();
        self.apply_scale(limits.clamp(self.scale), focal);
        self.clamp_to_bounds();
        self.notify();
    }

    /// Resets the transform so the whole image fits the viewport, centered.
    ///
    /// The scale is `min(viewport.width / image.width, viewport.height /
    /// image.height)`. When the viewport has not been measured yet (a zero
    /// dimension), nothing changes now: the fit is deferred until
    /// [`Self::set_viewport_size`] provides a real size. A zero-sized image
    /// is ignored.
    pub fn fit_to_viewport(&mut self, image: Size, viewport: Size) {
        if !is_positive(image) {
            return;
        }
        if !is_positive(viewport) {
            self.pending_fit = Some(image);
            return;
        }
        self.pending_fit = None;
        self.image = Some(image);
        self.viewport = viewport;

        let scale = f64::min(
            viewport.width / image.width,
            viewport.height / image.height,
        );
        let tx = (viewport.width - image.width * scale) / 2.0;
        let ty = (viewport.height - image.height * scale) / 2.0;
        self.transform = Affine::translate((tx, ty)) * Affine::scale(scale);
        self.scale = scale;
        self.notify();
    }

    /// Re-fits the current image, or the one waiting for a viewport.
    pub fn reset_view(&mut self) {
        if let Some(image) = self.pending_fit.or(self.image) {
            self.fit_to_viewport(image, self.viewport);
        }
    }

    /// Records a new viewport size, for example after a layout pass.
    ///
    /// Runs a deferred fit if one is pending; otherwise re-clamps the current
    /// transform against the new viewport.
    pub fn set_viewport_size(&mut self, viewport: Size) {
        if let Some(image) = self.pending_fit {
            if is_positive(viewport) {
                self.fit_to_viewport(image, viewport);
                return;
            }
        }
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        if self.clamp_to_bounds() {
            self.notify();
        }
    }

    /// Begins a two-finger gesture.
    ///
    /// With exactly two points, their midpoint becomes the pan reference.
    /// Any other pointer count is declined.
    pub fn gesture_begin(&mut self, points: &[Point]) -> Routing {
        if points.len() != 2 {
            return Routing::Unhandled;
        }
        let Some(mid) = crayon_touch::midpoint(points) else {
            return Routing::Unhandled;
        };
        self.pan.start(mid);
        Routing::Handled
    }

    /// Continues a two-finger gesture.
    ///
    /// With a pinch factor, the scale is multiplied by the factor, limited to
    /// [`ZoomLimits`], and the resulting ratio is applied about the gesture's
    /// focal point so the content under the fingers stays put. Without one,
    /// the transform follows the movement of the fingers' midpoint.
    pub fn gesture_update(&mut self, points: &[Point], pinch_factor: Option<f64>) -> Routing {
        let Some(mid) = crayon_touch::midpoint(points) else {
            return Routing::Unhandled;
        };

        match pinch_factor {
            Some(factor) => {
                if !(factor.is_finite() && factor > 0.0) {
                    return Routing::Handled;
                }
                let new_scale = self.limits.clamp(self.scale * factor);
                self.apply_scale(new_scale, mid);
                // Keep the pan reference fresh so a pan that follows the
                // pinch starts from here instead of jumping.
                if self.pan.is_tracking() {
                    self.pan.start(mid);
                }
            }
            None => {
                let Some(delta) = self.pan.update(mid) else {
                    return Routing::Unhandled;
                };
                self.transform = Affine::translate(delta) * self.transform;
            }
        }

        self.clamp_to_bounds();
        self.notify();
        Routing::Handled
    }

    /// Ends the current gesture. The transform is left unchanged.
    pub fn gesture_end(&mut self) {
        self.pan.end();
        self.pinch.end();
    }

    fn apply_scale(&mut self, new_scale: f64, focal: Point) {
        let ratio = new_scale / self.scale;
        let about = focal.to_vec2();
        self.transform = Affine::translate(about)
            * Affine::scale(ratio)
            * Affine::translate(-about)
            * self.transform;
        self.scale = new_scale;
    }

    /// Pulls the image back against the viewport edges.
    ///
    /// Only axes on which the transformed image is larger than the viewport
    /// are corrected. Returns `true` if the transform moved.
    fn clamp_to_bounds(&mut self) -> bool {
        let Some(rect) = self.image_rect_in_view() else {
            return false;
        };
        let Size {
            width: vw,
            height: vh,
        } = self.viewport;

        let mut dx = 0.0;
        let mut dy = 0.0;

        if rect.width() > vw {
            if rect.x0 > 0.0 {
                dx = -rect.x0;
            }
            if rect.x1 < vw {
                dx = vw - rect.x1;
            }
        }
        if rect.height() > vh {
            if rect.y0 > 0.0 {
                dy = -rect.y0;
            }
            if rect.y1 < vh {
                dy = vh - rect.y1;
            }
        }

        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        self.transform = Affine::translate(Vec2::new(dx, dy)) * self.transform;
        true
    }

    fn notify(&mut self) {
        let snapshot = self.transform;
        if let Some(listener) = self.listener.as_mut() {
            listener(snapshot);
        }
    }
}

impl TouchTarget for ZoomController {
    /// Drives pans and pinches from raw touch events.
    ///
    /// Events with fewer than two pointers are declined, except for the
    /// release that ends a gesture this controller was tracking.
    fn handle_touch(&mut self, event: &TouchEvent) -> Routing {
        let tracking = self.pan.is_tracking();
        match event.phase {
            TouchPhase::Down | TouchPhase::PointerDown => {
                let routing = self.gesture_begin(&event.points);
                if routing.is_handled() {
                    if let Some(span) = crayon_touch::span(&event.points) {
                        self.pinch.begin(span);
                    }
                }
                routing
            }
            TouchPhase::Move => {
                if event.pointer_count() < 2 || !tracking {
                    return Routing::Unhandled;
                }
                let factor = crayon_touch::span(&event.points)
                    .and_then(|s| self.pinch.update(s));
                self.gesture_update(&event.points, factor)
            }
            TouchPhase::PointerUp | TouchPhase::Up | TouchPhase::Cancel => {
                self.gesture_end();
                if tracking || event.pointer_count() >= 2 {
                    Routing::Handled
                } else {
                    Routing::Unhandled
                }
            }
        }
    }
}

fn is_positive(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0 && size.is_finite()
}
