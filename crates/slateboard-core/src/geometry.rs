//! Fixed-point pixel coordinates and bounding-box helpers.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Number of fractional bits carried by [`FixedPoint`] coordinates.
pub const PRECISION_BITS: u32 = 7;

/// Scale between whole pixels and fixed-point units (1/128 pixel).
pub const PRECISION_SCALE: f64 = (1u32 << PRECISION_BITS) as f64;

/// Largest pixel distance from the viewport origin a [`FixedPoint`] holds.
pub const MAX_PIXEL: f64 = i32::MAX as f64 / PRECISION_SCALE;

/// A pixel coordinate quantized to 1/128 of a pixel.
///
/// Renderers use the fractional bits to draw anti-aliased geometry at
/// sub-pixel positions. Coordinates are limited to about 16.7 million
/// pixels either side of the viewport origin ([`MAX_PIXEL`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedPoint {
    pub x: i32,
    pub y: i32,
}

impl FixedPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Quantize a float pixel position.
    ///
    /// Coordinates beyond [`MAX_PIXEL`] saturate. Open strokes that can
    /// reach that far go through
    /// [`View::project_polyline`](crate::view::View::project_polyline),
    /// which clips them first.
    pub fn from_pixels(point: Point) -> Self {
        Self {
            x: (point.x * PRECISION_SCALE).round() as i32,
            y: (point.y * PRECISION_SCALE).round() as i32,
        }
    }

    /// Back to float pixels.
    pub fn to_pixels(self) -> Point {
        Point::new(
            f64::from(self.x) / PRECISION_SCALE,
            f64::from(self.y) / PRECISION_SCALE,
        )
    }
}

/// Tight axis-aligned box around `points`, or `None` when there are none.
pub fn bounds_of(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;

    for point in &points[1..] {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Some(Rect::new(min_x, min_y, max_x, max_y))
}

/// Closed-interval overlap test on both axes.
///
/// Boxes that merely touch along an edge or a corner overlap, and so do
/// zero-area boxes lying inside the other one.
pub fn boxes_overlap(a: Rect, b: Rect) -> bool {
    let a = a.abs();
    let b = b.abs();
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Clip segment `a`-`b` to `bounds` (Liang-Barsky).
///
/// Returns the visible part, or `None` when the segment misses `bounds`.
/// Endpoints already inside come back unchanged.
pub fn clip_segment(a: Point, b: Point, bounds: Rect) -> Option<(Point, Point)> {
    let d = b - a;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (p, q) in [
        (-d.x, a.x - bounds.x0),
        (d.x, bounds.x1 - a.x),
        (-d.y, a.y - bounds.y0),
        (d.y, bounds.y1 - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    let start = if t0 > 0.0 { a + d * t0 } else { a };
    let end = if t1 < 1.0 { a + d * t1 } else { b };
    Some((start, end))
}
