// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crayon_imaging::{ImageData, ImagingBackend, ImagingBackendExt, ink_stroke_style};
use crayon_touch::{Routing, TouchEvent, TouchPhase, TouchTarget};
use kurbo::{Affine, BezPath, Point};

use crate::color::Argb;
use crate::document::{DocumentError, HistoryDocument};
use crate::history::History;
use crate::smooth::LiveStroke;
use crate::stroke::{Brush, Stroke};

type HistoryListener = Box<dyn FnMut()>;

/// Freehand drawing over a base image, with undo/redo.
///
/// Touches arrive in view coordinates and are mapped through the inverse of
/// the transform last pushed with [`DrawingSurface::set_transform`], so
/// strokes are recorded in image coordinates whatever the current pan and
/// zoom. The surface never computes that transform itself.
///
/// Only single-finger input draws. Any event with another pointer count
/// cancels the stroke in progress and is reported as
/// [`Routing::Unhandled`], leaving it to a gesture layer.
pub struct DrawingSurface {
    base_image: Option<ImageData>,
    history: History,
    live: Option<LiveStroke>,
    brush: Brush,
    transform: Affine,
    needs_redraw: bool,
    history_listener: Option<HistoryListener>,
}

impl fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawingSurface")
            .field(
                "base_image",
                &self.base_image.as_ref().map(|i| (i.width, i.height)),
            )
            .field("history", &self.history)
            .field("live", &self.live)
            .field("brush", &self.brush)
            .field("transform", &self.transform)
            .field("needs_redraw", &self.needs_redraw)
            .field("history_listener", &self.history_listener.is_some())
            .finish()
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface {
    /// Creates an empty surface with the default brush and no base image.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_image: None,
            history: History::default(),
            live: None,
            brush: Brush::default(),
            transform: Affine::IDENTITY,
            needs_redraw: false,
            history_listener: None,
        }
    }

    /// Installs the history listener, called after every change to the
    /// undo/redo stacks.
    pub fn set_history_listener(&mut self, listener: impl FnMut() + 'static) {
        self.history_listener = Some(Box::new(listener));
    }

    /// Removes the history listener.
    pub fn clear_history_listener(&mut self) {
        self.history_listener = None;
    }

    /// Stores a snapshot of the image-to-view transform.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.request_redraw();
    }

    /// Transform last pushed with [`Self::set_transform`].
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replaces the backdrop and discards all strokes, including the redo
    /// buffer.
    pub fn set_base_image(&mut self, image: ImageData) {
        log::debug!(
            "base image set to {}x{}, dropping {} strokes",
            image.width,
            image.height,
            self.history.strokes().len() + self.history.undone().len()
        );
        self.base_image = Some(image);
        self.history.clear();
        self.notify_history();
        self.request_redraw();
    }

    /// Removes the backdrop. Strokes are kept and drawn in view coordinates.
    pub fn clear_base_image(&mut self) {
        if self.base_image.take().is_some() {
            self.request_redraw();
        }
    }

    /// Current backdrop.
    #[must_use]
    pub fn base_image(&self) -> Option<&ImageData> {
        self.base_image.as_ref()
    }

    /// Sets the color used for strokes finalized from now on.
    pub fn set_brush_color(&mut self, color: Argb) {
        self.brush.color = color;
        if self.live.is_some() {
            self.request_redraw();
        }
    }

    /// Sets the width used for strokes finalized from now on.
    ///
    /// Widths that are not finite and positive are ignored.
    pub fn set_brush_size(&mut self, width: f32) {
        if !(width.is_finite() && width > 0.0) {
            log::warn!("ignoring brush size {width}");
            return;
        }
        self.brush.width = width;
        if self.live.is_some() {
            self.request_redraw();
        }
    }

    /// Pending brush.
    #[must_use]
    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Visible strokes in paint order.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        self.history.strokes()
    }

    /// Redo buffer, most recently undone last.
    #[must_use]
    pub fn undone(&self) -> &[Stroke] {
        self.history.undone()
    }

    /// Both history stacks.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns `true` between finger down and finger up.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.live.is_some()
    }

    /// Feeds one touch event into the stroke state machine.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> Routing {
        let Some(view_pt) = event.primary().filter(|_| event.pointer_count() == 1) else {
            self.cancel_stroke();
            return Routing::Unhandled;
        };
        let (x, y) = self.view_to_image(view_pt);

        match event.phase {
            TouchPhase::Down => {
                log::trace!("stroke begins at ({x}, {y})");
                self.live = Some(LiveStroke::begin(x, y));
                self.request_redraw();
                Routing::Handled
            }
            TouchPhase::Move => {
                let Some(live) = self.live.as_mut() else {
                    return Routing::Unhandled;
                };
                live.push(x, y);
                self.request_redraw();
                Routing::Handled
            }
            TouchPhase::Up => {
                let Some(mut live) = self.live.take() else {
                    return Routing::Unhandled;
                };
                live.push(x, y);
                let stroke = Stroke::new(live.into_points(), self.brush.color, self.brush.width);
                log::debug!(
                    "stroke finalized: {} points, {:?}, width {}",
                    stroke.len(),
                    stroke.color(),
                    stroke.width()
                );
                self.history.push(stroke);
                self.notify_history();
                self.request_redraw();
                Routing::Handled
            }
            TouchPhase::Cancel => {
                if self.cancel_stroke() {
                    Routing::Handled
                } else {
                    Routing::Unhandled
                }
            }
            TouchPhase::PointerDown | TouchPhase::PointerUp => Routing::Unhandled,
        }
    }

    /// Discards the stroke in progress, if any, without recording it.
    ///
    /// Returns `true` if a stroke was discarded.
    pub fn cancel_stroke(&mut self) -> bool {
        if self.live.take().is_none() {
            return false;
        }
        log::trace!("stroke cancelled");
        self.request_redraw();
        true
    }

    /// Moves the newest stroke to the redo buffer. Returns `false` if there
    /// is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        log::debug!("undo, {} strokes remain", self.history.strokes().len());
        self.notify_history();
        self.request_redraw();
        true
    }

    /// Restores the most recently undone stroke. Returns `false` if there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        log::debug!("redo, {} strokes visible", self.history.strokes().len());
        self.notify_history();
        self.request_redraw();
        true
    }

    /// Erases every stroke, the redo buffer and any stroke in progress.
    ///
    /// Does nothing, and does not notify, when there are no visible strokes
    /// and no stroke in progress.
    pub fn clear(&mut self) {
        if !self.history.can_undo() && self.live.is_none() {
            return;
        }
        self.history.clear();
        self.live = None;
        self.notify_history();
        self.request_redraw();
    }

    /// `true` if there is a stroke to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// `true` if there is a stroke to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Draws the surface with the pushed transform.
    pub fn render<B: ImagingBackend + ?Sized>(&self, backend: &mut B) {
        self.render_with_transform(backend, self.transform);
    }

    /// Draws the surface under `transform`.
    ///
    /// With a base image, the image, the strokes (oldest first, each with its
    /// own color and width) and the stroke in progress (with the pending
    /// brush) all share `transform`. Without one, the strokes are drawn in
    /// untransformed view coordinates.
    pub fn render_with_transform<B: ImagingBackend + ?Sized>(
        &self,
        backend: &mut B,
        transform: Affine,
    ) {
        match &self.base_image {
            Some(image) => {
                backend.set_transform(transform);
                backend.draw_image(image.clone(), Affine::IDENTITY);
            }
            None => backend.set_transform(Affine::IDENTITY),
        }
        self.draw_strokes(backend);
        if let Some(live) = &self.live {
            let path = live.path().clone();
            draw_ink(backend, self.brush.color, self.brush.width, path);
        }
    }

    /// Renders the base image at native resolution with every visible stroke
    /// on top.
    ///
    /// Returns `None` when there is no base image, or when it is too large
    /// for the rasterizer.
    #[must_use]
    pub fn flatten(&self) -> Option<ImageData> {
        let Some(base) = &self.base_image else {
            log::debug!("flatten without a base image");
            return None;
        };
        let out = crayon_imaging_vello_cpu::rasterize(base.width, base.height, |backend| {
            backend.set_transform(Affine::IDENTITY);
            backend.draw_image(base.clone(), Affine::IDENTITY);
            self.draw_strokes(backend);
        });
        if out.is_none() {
            log::warn!("cannot flatten a {}x{} base image", base.width, base.height);
        }
        out
    }

    /// Snapshot of both history stacks.
    #[must_use]
    pub fn serialize(&self) -> HistoryDocument {
        HistoryDocument::from(&self.history)
    }

    /// History encoded as JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        self.serialize().to_json()
    }

    /// Replaces both history stacks from JSON text.
    ///
    /// On error the history is left exactly as it was.
    pub fn deserialize(&mut self, text: &str) -> Result<(), DocumentError> {
        let doc = HistoryDocument::from_json(text).inspect_err(|err| {
            log::warn!("history document rejected: {err}");
        })?;
        self.apply_document(doc);
        Ok(())
    }

    /// Replaces both history stacks from a parsed document.
    ///
    /// The document is validated first; on error the history is left
    /// exactly as it was.
    pub fn restore(&mut self, doc: HistoryDocument) -> Result<(), DocumentError> {
        doc.validate().inspect_err(|err| {
            log::warn!("history document rejected: {err}");
        })?;
        self.apply_document(doc);
        Ok(())
    }

    /// Returns `true` if something changed since the last
    /// [`Self::take_redraw_request`].
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Consumes the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        core::mem::take(&mut self.needs_redraw)
    }

    fn apply_document(&mut self, doc: HistoryDocument) {
        log::debug!(
            "history restored: {} strokes, {} undone",
            doc.strokes.len(),
            doc.undone.len()
        );
        self.history = doc.into();
        self.notify_history();
        self.request_redraw();
    }

    fn draw_strokes<B: ImagingBackend + ?Sized>(&self, backend: &mut B) {
        for stroke in self.history.strokes() {
            draw_ink(backend, stroke.color(), stroke.width(), stroke.path());
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "stroke points are stored as f32"
    )]
    fn view_to_image(&self, pt: Point) -> (f32, f32) {
        let inverse = if self.transform.determinant().abs() > f64::EPSILON {
            self.transform.inverse()
        } else {
            Affine::IDENTITY
        };
        let mapped = inverse * pt;
        if mapped.is_finite() {
            (mapped.x as f32, mapped.y as f32)
        } else {
            (pt.x as f32, pt.y as f32)
        }
    }

    fn notify_history(&mut self) {
        if let Some(listener) = self.history_listener.as_mut() {
            listener();
        }
    }

    fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }
}

fn draw_ink<B: ImagingBackend + ?Sized>(backend: &mut B, color: Argb, width: f32, path: BezPath) {
    backend.set_paint(color.to_color());
    backend.set_stroke(ink_stroke_style(f64::from(width)));
    backend.stroke_path(path);
}

impl TouchTarget for DrawingSurface {
    fn handle_touch(&mut self, event: &TouchEvent) -> Routing {
        Self::handle_touch(self, event)
    }
}
