//! Circles given by a center and a point on the rim.

use super::{
    Lifecycle, ProjectionCache, VectorId, VectorStyle, VectorTrait, push_endpoint,
    translate_points,
};
use crate::draw::DrawCommand;
use crate::view::View;
use kurbo::{Point, Rect, Vec2};
use std::f64::consts::TAU;
use uuid::Uuid;

/// Samples used for the projected outline, first and last coincide.
pub const CIRCLE_SAMPLES: usize = 100;

/// A circle: point 0 is the center, point 1 lies on the rim.
#[derive(Debug, Clone)]
pub struct Circle {
    pub(crate) id: VectorId,
    points: Vec<Point>,
    pub style: VectorStyle,
    pub(crate) lifecycle: Lifecycle,
    cache: ProjectionCache,
}

impl Circle {
    /// Start a zero-radius circle centered on `center`.
    pub fn new(center: Point, style: VectorStyle) -> Self {
        Self::from_points(center, center, style)
    }

    pub fn from_points(center: Point, rim: Point, style: VectorStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![center, rim],
            style,
            lifecycle: Lifecycle::default(),
            cache: ProjectionCache::new(),
        }
    }

    pub fn center(&self) -> Point {
        self.points[0]
    }

    pub fn radius(&self) -> f64 {
        (self.points[1] - self.points[0]).hypot()
    }

    #[cfg(test)]
    pub(crate) fn cached_views(&self) -> usize {
        self.cache.len()
    }
}

impl VectorTrait for Circle {
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

    /// The full disc, not just the two stored points.
    fn bounds(&self) -> Rect {
        let center = self.center();
        let radius = self.radius();
        Rect::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    fn project(&mut self, view: &View) -> Vec<DrawCommand> {
        let (center, radius) = (self.center(), self.radius());
        let points = self
            .cache
            .get_or_project(view, || view.project_points(&outline(center, radius)))
            .to_vec();
        vec![DrawCommand::Polyline {
            closed: points.len() > 1,
            points,
            color: self.style.color,
            width: self.style.thickness,
        }]
    }
}

/// Evenly spaced rim samples; a zero radius collapses to the center.
fn outline(center: Point, radius: f64) -> Vec<Point> {
    if radius == 0.0 {
        return vec![center];
    }
    let step = TAU / (CIRCLE_SAMPLES - 1) as f64;
    (0..CIRCLE_SAMPLES)
        .map(|i| {
            let angle = step * i as f64;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}
