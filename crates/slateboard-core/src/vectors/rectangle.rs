//! Axis-aligned rectangles.

use super::{
    Lifecycle, ProjectionCache, VectorId, VectorStyle, VectorTrait, push_endpoint,
    translate_points,
};
use crate::draw::DrawCommand;
use crate::view::View;
use kurbo::{Point, Vec2};
use uuid::Uuid;

/// A rectangle with opposite corners at point 0 and point 1.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub(crate) id: VectorId,
    points: Vec<Point>,
    pub style: VectorStyle,
    pub(crate) lifecycle: Lifecycle,
    cache: ProjectionCache,
}

impl Rectangle {
    /// Start a zero-size rectangle at `corner`.
    pub fn new(corner: Point, style: VectorStyle) -> Self {
        Self::from_corners(corner, corner, style)
    }

    pub fn from_corners(first: Point, second: Point, style: VectorStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![first, second],
            style,
            lifecycle: Lifecycle::default(),
            cache: ProjectionCache::new(),
        }
    }

    /// The four corners, clockwise from the anchor in screen orientation.
    pub fn corners(&self) -> [Point; 4] {
        let (a, b) = (self.points[0], self.points[1]);
        [a, Point::new(b.x, a.y), b, Point::new(a.x, b.y)]
    }
}

impl VectorTrait for Rectangle {
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
        self.cache.invalidate();
    }

    fn translate(&mut self, delta: Vec2) {
        translate_points(&mut self.points, delta);
        self.cache.invalidate();
    }

    fn project(&mut self, view: &View) -> Vec<DrawCommand> {
        let corners = self.corners();
        let points = self
            .cache
            .get_or_project(view, || view.project_points(&corners))
            .to_vec();
        vec![DrawCommand::Polyline {
            points,
            closed: true,
            color: self.style.color,
            width: self.style.thickness,
        }]
    }
}
