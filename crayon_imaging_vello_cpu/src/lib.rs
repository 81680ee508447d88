// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vello CPU–backed implementation of the imaging backend.
//!
//! [`VelloCpuImagingBackend`] implements [`ImagingBackend`] on top of the
//! sparse-strips [`vello_cpu::RenderContext`]. [`rasterize`] wraps the usual
//! create, draw, flush and read back sequence and returns straight-alpha
//! RGBA8 pixels, which is what flattening a drawing into an exportable
//! picture needs.
//!
//! ```
//! use crayon_imaging::{ImagingBackendExt, ink_stroke_style};
//! use crayon_imaging_vello_cpu::rasterize;
//! use kurbo::BezPath;
//! use peniko::Color;
//!
//! let mut line = BezPath::new();
//! line.move_to((2.0, 8.0));
//! line.line_to((14.0, 8.0));
//!
//! let image = rasterize(16, 16, |backend| {
//!     backend.set_paint(Color::BLACK);
//!     backend.set_stroke(ink_stroke_style(4.0));
//!     backend.stroke_path(line);
//! })
//! .unwrap();
//! assert_eq!((image.width, image.height), (16, 16));
//! ```

#![deny(unsafe_code)]
#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use crayon_imaging::{DrawOp, ImagingBackend, StateOp};
use kurbo::{Affine, BezPath, Cap, Join, PathEl};
use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};
use vello_cpu::kurbo::{
    Affine as CpuAffine, BezPath as CpuBezPath, Cap as CpuCap, Join as CpuJoin,
    PathEl as CpuPathEl, Point as CpuPoint, Rect, Stroke,
};
use vello_cpu::{Image as CpuImage, ImageSource, Pixmap, RenderContext, RenderMode, RenderSettings};

/// CPU-backed implementation of the imaging backend using `vello_cpu`.
pub struct VelloCpuImagingBackend<'ctx> {
    /// Underlying Vello CPU render context to draw into.
    pub ctx: &'ctx mut RenderContext,
    current_transform: Affine,
}

impl fmt::Debug for VelloCpuImagingBackend<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VelloCpuImagingBackend")
            .field("current_transform", &self.current_transform)
            .finish_non_exhaustive()
    }
}

impl<'ctx> VelloCpuImagingBackend<'ctx> {
    /// Create a new backend that renders into the given CPU render context.
    pub fn new(ctx: &'ctx mut RenderContext) -> Self {
        ctx.set_transform(CpuAffine::IDENTITY);
        Self {
            ctx,
            current_transform: Affine::IDENTITY,
        }
    }

    /// Transform most recently set through [`StateOp::SetTransform`].
    pub fn current_transform(&self) -> Affine {
        self.current_transform
    }

    fn affine_to_cpu(xf: Affine) -> CpuAffine {
        CpuAffine::new(xf.as_coeffs())
    }

    fn path_to_cpu(path: &BezPath) -> CpuBezPath {
        let pt = |p: kurbo::Point| CpuPoint::new(p.x, p.y);
        let mut out = CpuBezPath::new();
        for el in path.elements() {
            out.push(match *el {
                PathEl::MoveTo(p) => CpuPathEl::MoveTo(pt(p)),
                PathEl::LineTo(p) => CpuPathEl::LineTo(pt(p)),
                PathEl::QuadTo(c, p) => CpuPathEl::QuadTo(pt(c), pt(p)),
                PathEl::CurveTo(c0, c1, p) => CpuPathEl::CurveTo(pt(c0), pt(c1), pt(p)),
                PathEl::ClosePath => CpuPathEl::ClosePath,
            });
        }
        out
    }
}

impl ImagingBackend for VelloCpuImagingBackend<'_> {
    fn state(&mut self, op: StateOp) {
        match op {
            StateOp::SetTransform(xf) => {
                self.current_transform = xf;
                self.ctx.set_transform(Self::affine_to_cpu(xf));
            }
            StateOp::SetPaint(color) => {
                self.ctx.set_paint(color);
            }
            StateOp::SetStroke(style) => {
                let mut stroke = Stroke::new(style.width);
                stroke.miter_limit = style.miter_limit;
                stroke.join = match style.join {
                    Join::Bevel => CpuJoin::Bevel,
                    Join::Miter => CpuJoin::Miter,
                    Join::Round => CpuJoin::Round,
                };
                stroke.start_cap = match style.start_cap {
                    Cap::Butt => CpuCap::Butt,
                    Cap::Round => CpuCap::Round,
                    Cap::Square => CpuCap::Square,
                };
                stroke.end_cap = match style.end_cap {
                    Cap::Butt => CpuCap::Butt,
                    Cap::Round => CpuCap::Round,
                    Cap::Square => CpuCap::Square,
                };
                self.ctx.set_stroke(stroke);
            }
        }
    }

    fn draw(&mut self, op: DrawOp) {
        match op {
            DrawOp::StrokePath(path) => {
                if path.elements().is_empty() {
                    return;
                }
                self.ctx.stroke_path(&Self::path_to_cpu(&path));
            }
            DrawOp::DrawImage {
                image,
                transform,
                sampler,
            } => {
                let rect = Rect::new(0.0, 0.0, f64::from(image.width), f64::from(image.height));
                let image_paint = CpuImage {
                    image: ImageSource::from_peniko_image_data(&image),
                    sampler,
                };

                let saved_transform = *self.ctx.transform();
                let saved_paint = self.ctx.paint().clone();

                self.ctx.set_paint(image_paint);
                self.ctx
                    .set_transform(saved_transform * Self::affine_to_cpu(transform));
                self.ctx.fill_rect(&rect);

                self.ctx.set_transform(saved_transform);
                self.ctx.set_paint(saved_paint);
            }
        }
    }
}

/// Render the ops issued by `build` into a fresh `width` x `height` target and
/// read the result back as straight-alpha RGBA8 image data.
///
/// The target starts fully transparent. Returns `None` when a dimension is
/// zero or does not fit the renderer's `u16` surface size.
pub fn rasterize<F>(width: u32, height: u32, build: F) -> Option<ImageData>
where
    F: FnOnce(&mut VelloCpuImagingBackend<'_>),
{
    let w = u16::try_from(width).ok().filter(|w| *w > 0)?;
    let h = u16::try_from(height).ok().filter(|h| *h > 0)?;

    let settings = RenderSettings {
        render_mode: RenderMode::OptimizeSpeed,
        ..RenderSettings::default()
    };
    let mut ctx = RenderContext::new_with(w, h, settings);
    {
        let mut backend = VelloCpuImagingBackend::new(&mut ctx);
        build(&mut backend);
    }

    let mut pixmap = Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    let unpremul = pixmap.take_unpremultiplied();
    let mut bytes = Vec::with_capacity(unpremul.len() * 4);
    for p in unpremul {
        bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
    }

    Some(ImageData {
        data: Blob::from(bytes),
        format: ImageFormat::Rgba8,
        alpha_type: ImageAlphaType::Alpha,
        width,
        height,
    })
}
