// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crayon Imaging: backend-agnostic imaging IR and backend trait.
//!
//! Drawing surfaces describe what they paint as a short sequence of
//! [`StateOp`] (mutate state) and [`DrawOp`] (produce pixels) values handed to
//! an [`ImagingBackend`]. Concrete backends turn those into pixels
//! (`crayon_imaging_vello_cpu`) or record them for inspection
//! (`crayon_imaging_ref`).
//!
//! Unlike a retained renderer, ops carry their geometry and images inline:
//! a stroke path is a [`BezPath`] and an image is a [`peniko::ImageData`],
//! whose pixel storage is reference counted and cheap to clone.
//!
//! # Example
//!
//! ```
//! use crayon_imaging::{
//!     DrawOp, ImagingBackend, ImagingBackendExt, StateOp, ink_stroke_style,
//! };
//! use kurbo::{Affine, BezPath};
//! use peniko::Color;
//!
//! #[derive(Default)]
//! struct Count(usize);
//!
//! impl ImagingBackend for Count {
//!     fn state(&mut self, _op: StateOp) {}
//!     fn draw(&mut self, _op: DrawOp) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut path = BezPath::new();
//! path.move_to((0.0, 0.0));
//! path.quad_to((10.0, 0.0), (10.0, 10.0));
//!
//! let mut backend = Count::default();
//! backend.set_transform(Affine::scale(2.0));
//! backend.set_paint(Color::from_rgb8(0xFF, 0x6B, 0x6B));
//! backend.set_stroke(ink_stroke_style(8.0));
//! backend.stroke_path(path);
//! assert_eq!(backend.0, 1);
//! ```

#![no_std]

extern crate alloc;

use kurbo::{BezPath, Cap, Join};
pub use peniko::{Color, ImageAlphaType, ImageData, ImageFormat, ImageSampler};

/// 2D affine transform used throughout the imaging IR.
pub type Affine = kurbo::Affine;

/// Stroke style used by `StateOp::SetStroke`.
///
/// This is a re-export of [`kurbo::Stroke`], which captures width, joins,
/// caps and dashes.
pub type StrokeStyle = kurbo::Stroke;

/// State operations that mutate the current imaging state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Set the current transform matrix.
    SetTransform(Affine),
    /// Set the current solid paint.
    SetPaint(Color),
    /// Set the current stroke style.
    SetStroke(StrokeStyle),
}

/// Draw operations that produce pixels given the current state.
#[derive(Clone, Debug)]
pub enum DrawOp {
    /// Stroke the given path with the current stroke and paint.
    StrokePath(BezPath),
    /// Draw an image, placed by `transform` composed with the current
    /// transform, covering `[0, width] x [0, height]` in image space.
    DrawImage {
        /// Pixels to draw.
        image: ImageData,
        /// Transform applied to the image before the current transform.
        transform: Affine,
        /// Parameters that specify how to sample the image.
        sampler: ImageSampler,
    },
}

/// Unified imaging operation, as kept by recording backends.
#[derive(Clone, Debug)]
pub enum ImagingOp {
    /// State-changing operation.
    State(StateOp),
    /// Drawing operation.
    Draw(DrawOp),
}

/// Minimal imaging backend trait.
pub trait ImagingBackend {
    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);
}

/// Convenience helpers for `ImagingBackend` callers.
///
/// This is separate from [`ImagingBackend`] so that the core trait stays
/// small and object safe (`&mut dyn ImagingBackend`).
pub trait ImagingBackendExt: ImagingBackend {
    /// Equivalent to `self.state(StateOp::SetTransform(xf))`.
    #[inline]
    fn set_transform(&mut self, xf: Affine) {
        self.state(StateOp::SetTransform(xf));
    }

    /// Equivalent to `self.state(StateOp::SetPaint(color))`.
    #[inline]
    fn set_paint(&mut self, color: Color) {
        self.state(StateOp::SetPaint(color));
    }

    /// Equivalent to `self.state(StateOp::SetStroke(style))`.
    #[inline]
    fn set_stroke(&mut self, style: StrokeStyle) {
        self.state(StateOp::SetStroke(style));
    }

    /// Equivalent to `self.draw(DrawOp::StrokePath(path))`.
    #[inline]
    fn stroke_path(&mut self, path: BezPath) {
        self.draw(DrawOp::StrokePath(path));
    }

    /// Draw `image` at its native size under `transform`, with default sampling.
    #[inline]
    fn draw_image(&mut self, image: ImageData, transform: Affine) {
        self.draw(DrawOp::DrawImage {
            image,
            transform,
            sampler: ImageSampler::default(),
        });
    }
}

impl<B: ImagingBackend + ?Sized> ImagingBackendExt for B {}

/// Replay a sequence of recorded ops into `backend`, in order.
pub fn replay<B>(backend: &mut B, ops: &[ImagingOp])
where
    B: ImagingBackend + ?Sized,
{
    for op in ops {
        match op {
            ImagingOp::State(op) => backend.state(op.clone()),
            ImagingOp::Draw(op) => backend.draw(op.clone()),
        }
    }
}

/// Stroke style for freehand ink of the given width: round caps and joins.
#[must_use]
pub fn ink_stroke_style(width: f64) -> StrokeStyle {
    StrokeStyle::new(width)
        .with_join(Join::Round)
        .with_caps(Cap::Round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Log(Vec<ImagingOp>);

    impl ImagingBackend for Log {
        fn state(&mut self, op: StateOp) {
            self.0.push(ImagingOp::State(op));
        }

        fn draw(&mut self, op: DrawOp) {
            self.0.push(ImagingOp::Draw(op));
        }
    }

    #[test]
    fn ext_helpers_forward_to_core_ops() {
        let mut log = Log::default();
        log.set_transform(Affine::translate((5.0, 0.0)));
        log.set_paint(Color::WHITE);
        log.stroke_path(BezPath::new());

        assert_eq!(log.0.len(), 3);
        assert!(matches!(
            log.0[0],
            ImagingOp::State(StateOp::SetTransform(xf)) if xf == Affine::translate((5.0, 0.0))
        ));
        assert!(matches!(log.0[2], ImagingOp::Draw(DrawOp::StrokePath(_))));
    }

    #[test]
    fn replay_preserves_order() {
        let ops = [
            ImagingOp::State(StateOp::SetPaint(Color::BLACK)),
            ImagingOp::State(StateOp::SetStroke(ink_stroke_style(3.0))),
            ImagingOp::Draw(DrawOp::StrokePath(BezPath::new())),
        ];
        let mut log = Log::default();
        replay(&mut log, &ops);
        assert_eq!(log.0.len(), 3);
        assert!(matches!(log.0[1], ImagingOp::State(StateOp::SetStroke(ref s)) if s.width == 3.0));
    }

    #[test]
    fn ink_style_is_round() {
        let style = ink_stroke_style(15.0);
        assert_eq!(style.width, 15.0);
        assert_eq!(style.join, Join::Round);
        assert_eq!(style.start_cap, Cap::Round);
        assert_eq!(style.end_cap, Cap::Round);
    }
}
