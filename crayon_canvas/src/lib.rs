// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crayon Canvas: freehand ink over a pannable, zoomable picture.
//!
//! [`DrawingSurface`] turns single-finger touches into smoothed strokes,
//! keeps them in an undo/redo [`History`], renders through any
//! [`crayon_imaging::ImagingBackend`], flattens the drawing into a new image
//! and round-trips its history through a [`HistoryDocument`].
//!
//! The surface is paired with a pan/zoom controller (see `crayon_view`) only
//! through a pushed transform: the controller reports its transform, the host
//! hands it to [`DrawingSurface::set_transform`], and touches are mapped back
//! into image space with its inverse.
//!
//! ## Example
//!
//! ```
//! use crayon_canvas::{Argb, DrawingSurface};
//! use crayon_touch::{TouchEvent, TouchPhase};
//! use kurbo::{Affine, Point};
//!
//! let mut surface = DrawingSurface::new();
//! surface.set_transform(Affine::scale(2.0));
//! surface.set_brush_color(Argb::opaque(0x4E, 0xCD, 0xC4));
//!
//! for (phase, x) in [(TouchPhase::Down, 0.0), (TouchPhase::Move, 20.0), (TouchPhase::Up, 40.0)] {
//!     surface.handle_touch(&TouchEvent::single(phase, Point::new(x, 10.0)));
//! }
//! assert_eq!(surface.strokes()[0].points(), &[0.0, 5.0, 10.0, 5.0, 20.0, 5.0]);
//!
//! assert!(surface.undo());
//! let json = surface.to_json().unwrap();
//!
//! let mut restored = DrawingSurface::new();
//! restored.deserialize(&json).unwrap();
//! assert!(restored.can_redo());
//! ```

mod color;
mod document;
mod history;
mod smooth;
mod stroke;
mod surface;

pub use color::{Argb, ColorRangeError};
pub use document::{DocumentError, HistoryDocument};
pub use history::History;
pub use smooth::smooth_path;
pub use stroke::{Brush, Stroke};
pub use surface::DrawingSurface;
