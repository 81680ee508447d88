// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crayon View: a bounded pan/zoom transform for an image shown in a viewport.
//!
//! [`ZoomController`] owns a single [`kurbo::Affine`] (uniform scale plus
//! translation) that maps image coordinates into view coordinates. It:
//! - Fits an image into the viewport, centered, with no cropping.
//! - Interprets two-finger gestures as pans and pinch zooms.
//! - Keeps the scale inside configurable [`ZoomLimits`].
//! - Clamps the translation so an image larger than the viewport never
//!   leaves a gap at a viewport edge.
//! - Broadcasts every change to a listener as an `Affine` snapshot.
//!
//! Single-finger input is declined so that a drawing surface stacked with the
//! controller can claim it (see [`crayon_touch::dispatch`]).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use crayon_view::ZoomController;
//!
//! let mut zoom = ZoomController::default();
//! zoom.set_listener(|xf| {
//!     // Push the snapshot into whatever renders the image.
//!     let _ = xf;
//! });
//!
//! zoom.fit_to_viewport(Size::new(2000.0, 800.0), Size::new(1000.0, 800.0));
//! assert!((zoom.scale() - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Design notes
//!
//! - The transform never rotates or skews.
//! - Fitting computes the exact fit scale and does not consult the zoom
//!   limits; the limits apply to pinch gestures.
//! - On an axis where the transformed image is not larger than the viewport
//!   no clamping happens, so a zoomed-out image may sit anywhere.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod controller;
mod limits;

pub use controller::ZoomController;
pub use limits::ZoomLimits;
