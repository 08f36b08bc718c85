//! View module: the board/pixel transform of one viewport.

use crate::geometry::{FixedPoint, bounds_of, boxes_overlap, clip_segment};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest board extent used when fitting a view to degenerate content.
pub const MIN_FIT_EXTENT: f64 = 1.0;

/// Default margin (fraction of the padded extent) used by [`View::fitting`].
pub const DEFAULT_FIT_MARGIN: f64 = 0.05;

/// Pixels kept around the viewport when clipping open polylines.
const GUARD_BAND: f64 = 1_000_000.0;

/// Immutable mapping between a pixel viewport and a region of board space.
///
/// `origin` is the board point under the top-left pixel and `zoom` is the
/// number of pixels per board unit. Every pan, zoom or resize produces a
/// new `View`; nothing mutates one in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    origin: Point,
    zoom: f64,
    size: Size,
}

impl View {
    /// Create a view.
    ///
    /// # Panics
    ///
    /// Panics if `zoom` is not a positive finite number.
    pub fn new(origin: Point, zoom: f64, size: Size) -> Self {
        assert!(
            zoom > 0.0 && zoom.is_finite(),
            "view zoom must be positive and finite, got {zoom}"
        );
        Self { origin, zoom, size }
    }

    /// Board point under the viewport's top-left pixel.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Pixels per board unit.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Viewport size in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The board-space box the viewport currently shows.
    pub fn board_bbox(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.size.width / self.zoom,
            self.origin.y + self.size.height / self.zoom,
        )
    }

    /// Board point to unquantized pixel position.
    pub fn board_to_pixel_f(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.origin.x) * self.zoom,
            (point.y - self.origin.y) * self.zoom,
        )
    }

    /// Board point to fixed-point pixel position.
    pub fn board_to_pixel(&self, point: Point) -> FixedPoint {
        FixedPoint::from_pixels(self.board_to_pixel_f(point))
    }

    /// Quantize a whole primitive's points in one pass.
    pub fn project_points(&self, points: &[Point]) -> Vec<FixedPoint> {
        points.iter().map(|p| self.board_to_pixel(*p)).collect()
    }

    /// Project an open polyline, clipped to a guard band around the viewport.
    ///
    /// Segments reaching beyond [`FixedPoint`]'s range would otherwise
    /// saturate and bend the visible part of the stroke. Each returned run
    /// is one connected piece; a stroke that leaves the band and comes back
    /// yields several.
    pub fn project_polyline(&self, points: &[Point]) -> Vec<Vec<FixedPoint>> {
        let guard = Rect::from_origin_size(Point::ZERO, self.size).inflate(GUARD_BAND, GUARD_BAND);
        let pixels: Vec<Point> = points.iter().map(|p| self.board_to_pixel_f(*p)).collect();
        if pixels.iter().all(|p| guard.contains(*p)) {
            return vec![pixels.into_iter().map(FixedPoint::from_pixels).collect()];
        }

        let mut runs = Vec::new();
        let mut run: Vec<FixedPoint> = Vec::new();
        for pair in pixels.windows(2) {
            let Some((start, end)) = clip_segment(pair[0], pair[1], guard) else {
                if !run.is_empty() {
                    runs.push(std::mem::take(&mut run));
                }
                continue;
            };
            let start = FixedPoint::from_pixels(start);
            if run.last() != Some(&start) {
                if !run.is_empty() {
                    runs.push(std::mem::take(&mut run));
                }
                run.push(start);
            }
            run.push(FixedPoint::from_pixels(end));
        }
        if !run.is_empty() {
            runs.push(run);
        }
        runs
    }

    /// Pixel position (possibly fractional) to board point.
    pub fn pixel_to_board(&self, pixel: Point) -> Point {
        Point::new(
            pixel.x / self.zoom + self.origin.x,
            pixel.y / self.zoom + self.origin.y,
        )
    }

    /// Fixed-point pixel position to board point.
    pub fn fixed_to_board(&self, pixel: FixedPoint) -> Point {
        self.pixel_to_board(pixel.to_pixels())
    }

    /// Shift the view by a pixel-space delta.
    ///
    /// Content follows the pointer: dragging right by `delta.x` pixels moves
    /// the origin left by `delta.x / zoom` board units.
    pub fn panned(&self, delta: Vec2) -> View {
        Self {
            origin: self.origin - delta / self.zoom,
            ..*self
        }
    }

    /// Change zoom keeping the board point under `anchor` (pixels) fixed.
    pub fn zoomed(&self, new_zoom: f64, anchor: Point) -> View {
        let anchored = self.pixel_to_board(anchor);
        let origin = anchored - anchor.to_vec2() / new_zoom;
        View::new(origin, new_zoom, self.size)
    }

    /// Adapt to a new viewport size without cropping.
    ///
    /// The old board box ends up inscribed in the new viewport, centered
    /// along the axis that gained room.
    pub fn resized(&self, new_size: Size) -> View {
        assert!(
            new_size.width > 0.0 && new_size.height > 0.0,
            "viewport size must be positive, got {new_size:?}"
        );
        let old_box = self.board_bbox();
        let old_aspect = self.size.width / self.size.height;
        let new_aspect = new_size.width / new_size.height;
        let center = old_box.center();

        if new_aspect > old_aspect {
            let zoom = new_size.height / old_box.height();
            let width = new_size.width / zoom;
            View::new(
                Point::new(center.x - width / 2.0, old_box.y0),
                zoom,
                new_size,
            )
        } else {
            let zoom = new_size.width / old_box.width();
            let height = new_size.height / zoom;
            View::new(
                Point::new(old_box.x0, center.y - height / 2.0),
                zoom,
                new_size,
            )
        }
    }

    /// Build a view that shows all of `points` with a relative margin.
    ///
    /// The tight box is first padded to the viewport's aspect ratio, then
    /// grown by `margin` on every side. A negative or non-finite margin
    /// counts as zero. Returns `None` for an empty slice.
    pub fn fitting(points: &[Point], viewport: Size, margin: f64) -> Option<View> {
        assert!(
            viewport.width > 0.0 && viewport.height > 0.0,
            "viewport size must be positive, got {viewport:?}"
        );
        let margin = if margin.is_finite() { margin.max(0.0) } else { 0.0 };
        let bounds = bounds_of(points)?;
        let center = bounds.center();
        let mut width = bounds.width().max(MIN_FIT_EXTENT);
        let mut height = bounds.height().max(MIN_FIT_EXTENT);

        let view_aspect = viewport.width / viewport.height;
        if width / height > view_aspect {
            height = width / view_aspect;
        } else {
            width = height * view_aspect;
        }

        let x_margin = width * margin;
        let y_margin = height * margin;
        let origin = Point::new(
            center.x - width / 2.0 - x_margin,
            center.y - height / 2.0 - y_margin,
        );
        let zoom = (viewport.width / (width + 2.0 * x_margin))
            .min(viewport.height / (height + 2.0 * y_margin));

        Some(View::new(origin, zoom, viewport))
    }

    /// Whether `bbox` (board space) intersects the visible board box.
    pub fn sees(&self, bbox: Rect) -> bool {
        boxes_overlap(bbox, self.board_bbox())
    }
}
