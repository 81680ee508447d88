// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Point};

fn pt(x: f32, y: f32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}

/// Builds the smoothed path through a flat `[x0, y0, x1, y1, ..]` point list.
///
/// The path starts at the first point. Each following point `P[i]` adds a
/// quadratic segment whose control point is the previous raw point `P[i-1]`
/// and whose end is the midpoint of `P[i-1]` and `P[i]`. The last raw point
/// is therefore never reached exactly, which keeps the ink continuous without
/// spline fitting.
///
/// An input with fewer than one whole point yields an empty path. A trailing
/// odd coordinate is ignored.
///
/// ```
/// use crayon_canvas::smooth_path;
/// use kurbo::{PathEl, Point};
///
/// let path = smooth_path(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0]);
/// assert_eq!(
///     path.elements(),
///     &[
///         PathEl::MoveTo(Point::new(0.0, 0.0)),
///         PathEl::QuadTo(Point::new(0.0, 0.0), Point::new(5.0, 0.0)),
///         PathEl::QuadTo(Point::new(10.0, 0.0), Point::new(10.0, 5.0)),
///     ]
/// );
/// ```
#[must_use]
pub fn smooth_path(points: &[f32]) -> BezPath {
    let mut path = BezPath::new();
    if points.len() < 2 {
        return path;
    }
    path.move_to(pt(points[0], points[1]));
    let mut i = 2;
    while i + 1 < points.len() {
        let (x0, y0) = (points[i - 2], points[i - 1]);
        let (x1, y1) = (points[i], points[i + 1]);
        path.quad_to(pt(x0, y0), pt((x0 + x1) / 2.0, (y0 + y1) / 2.0));
        i += 2;
    }
    path
}

/// The stroke being drawn, between finger down and finger up.
///
/// Keeps the raw points and extends the render path one segment per point,
/// with the same rule as [`smooth_path`].
#[derive(Clone, Debug, Default)]
pub(crate) struct LiveStroke {
    points: Vec<f32>,
    path: BezPath,
}

impl LiveStroke {
    pub(crate) fn begin(x: f32, y: f32) -> Self {
        let mut path = BezPath::new();
        path.move_to(pt(x, y));
        Self {
            points: vec![x, y],
            path,
        }
    }

    pub(crate) fn push(&mut self, x: f32, y: f32) {
        if let [.., lx, ly] = self.points[..] {
            self.path.quad_to(pt(lx, ly), pt((lx + x) / 2.0, (ly + y) / 2.0));
        }
        self.points.push(x);
        self.points.push(y);
    }

    pub(crate) fn path(&self) -> &BezPath {
        &self.path
    }

    pub(crate) fn into_points(self) -> Vec<f32> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn empty_and_partial_inputs() {
        assert!(smooth_path(&[]).elements().is_empty());
        assert!(smooth_path(&[3.0]).elements().is_empty());
        assert_eq!(
            smooth_path(&[1.0, 2.0]).elements(),
            &[PathEl::MoveTo(Point::new(1.0, 2.0))]
        );
    }

    #[test]
    fn trailing_odd_coordinate_is_ignored() {
        let a = smooth_path(&[0.0, 0.0, 4.0, 4.0]);
        let b = smooth_path(&[0.0, 0.0, 4.0, 4.0, 9.0]);
        assert_eq!(a.elements(), b.elements());
    }

    #[test]
    fn live_path_matches_batch_rule() {
        let raw = [1.0_f32, 1.0, 5.0, 3.0, 9.0, 2.0, 12.0, 8.0, 13.0, 13.0];
        let mut live = LiveStroke::begin(raw[0], raw[1]);
        for xy in raw[2..].chunks_exact(2) {
            live.push(xy[0], xy[1]);
        }
        assert_eq!(live.path().elements(), smooth_path(&raw).elements());
        assert_eq!(live.into_points(), raw.to_vec());
    }

    #[test]
    fn segment_count_is_one_per_extra_point() {
        let raw: Vec<f32> = (0..20).map(|i| i as f32).collect();
        // 10 points: one move plus nine quads.
        assert_eq!(smooth_path(&raw).elements().len(), 10);
    }
}
