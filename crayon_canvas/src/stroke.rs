// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::BezPath;
use serde::{Deserialize, Serialize};

use crate::color::Argb;
use crate::smooth::smooth_path;

/// A finalized freehand stroke.
///
/// Points are stored flat, `x` then `y`, in image coordinates. A stroke
/// records its own color and width, so later brush changes never alter how
/// it is drawn. Strokes are never mutated once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<f32>,
    color: Argb,
    width: f32,
}

impl Stroke {
    /// Creates a stroke from a flat point list.
    #[must_use]
    pub fn new(points: Vec<f32>, color: Argb, width: f32) -> Self {
        Self {
            points,
            color,
            width,
        }
    }

    /// Flat point list, `[x0, y0, x1, y1, ..]`.
    #[must_use]
    pub fn points(&self) -> &[f32] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len() / 2
    }

    /// Returns `true` if the stroke has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.len() < 2
    }

    /// Recorded color.
    #[must_use]
    pub fn color(&self) -> Argb {
        self.color
    }

    /// Recorded width in image units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Smoothed outline path of the stroke.
    #[must_use]
    pub fn path(&self) -> BezPath {
        smooth_path(&self.points)
    }
}

/// The pending brush applied to strokes finalized from now on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    /// Ink color.
    pub color: Argb,
    /// Line width in image units.
    pub width: f32,
}

impl Brush {
    /// Coral `#FF6B6B`.
    pub const DEFAULT_COLOR: Argb = Argb(0xFFFF_6B6B);
    /// Default line width.
    pub const DEFAULT_WIDTH: f32 = 8.0;
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Self::DEFAULT_COLOR,
            width: Self::DEFAULT_WIDTH,
        }
    }
}
