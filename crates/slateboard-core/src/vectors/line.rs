//! Straight line segments.

use super::{Lifecycle, VectorId, VectorStyle, VectorTrait, push_endpoint, translate_points};
use crate::draw::DrawCommand;
use crate::view::View;
use kurbo::{Point, Vec2};
use uuid::Uuid;

/// A segment from an anchor to the most recent free point.
#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) id: VectorId,
    points: Vec<Point>,
    pub style: VectorStyle,
    pub(crate) lifecycle: Lifecycle,
}

impl Line {
    /// Start a zero-length line at `start`.
    pub fn new(start: Point, style: VectorStyle) -> Self {
        Self::from_endpoints(start, start, style)
    }

    pub fn from_endpoints(start: Point, end: Point, style: VectorStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![start, end],
            style,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[1]
    }

    pub fn length(&self) -> f64 {
        (self.end() - self.start()).hypot()
    }
}

impl VectorTrait for Line {
    fn id(&self) -> VectorId {
        self.id
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn style(&self) -> &VectorStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut VectorStyle {
        &mut self.style
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn add_point(&mut self, point: Point) {
        push_endpoint(&mut self.points, point);
    }

    fn translate(&mut self, delta: Vec2) {
        translate_points(&mut self.points, delta);
    }

    fn project(&mut self, view: &View) -> Vec<DrawCommand> {
        view.project_polyline(&self.points)
            .into_iter()
            .map(|points| DrawCommand::Polyline {
                points,
                closed: false,
                color: self.style.color,
                width: self.style.thickness,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    #[test]
    fn test_intermediate_points_do_not_accumulate() {
        let mut line = Line::new(Point::new(0.0, 0.0), VectorStyle::default());
        line.add_point(Point::new(1.0, 1.0));
        line.add_point(Point::new(2.0, 0.0));
        line.add_point(Point::new(3.0, 4.0));
        assert_eq!(line.points(), &[Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
        assert!((line.length() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_project_two_points() {
        let mut line = Line::from_endpoints(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            VectorStyle::default(),
        );
        let view = View::new(Point::ZERO, 1.0, Size::new(50.0, 50.0));
        match &line.project(&view)[..] {
            [DrawCommand::Polyline { points, closed, .. }] => {
                assert_eq!(points.len(), 2);
                assert!(!closed);
            }
            other => panic!("unexpected projection {other:?}"),
        }
    }

    #[test]
    fn test_steep_zoom_keeps_visible_direction() {
        // At zoom 1000 the far end is 10^10 pixels away.
        let mut line = Line::from_endpoints(
            Point::new(0.0, 0.0),
            Point::new(1e7, 1e7),
            VectorStyle::default(),
        );
        let view = View::new(Point::ZERO, 1000.0, Size::new(800.0, 600.0));
        match &line.project(&view)[..] {
            [DrawCommand::Polyline { points, .. }] => {
                let (a, b) = (points[0].to_pixels(), points[1].to_pixels());
                assert_eq!(a, Point::ZERO);
                assert!(((b.y - a.y) / (b.x - a.x) - 1.0).abs() < 1e-6);
            }
            other => panic!("unexpected projection {other:?}"),
        }
    }
}
