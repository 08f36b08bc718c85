//! Freehand pencil strokes.

use super::{Lifecycle, VectorId, VectorStyle, VectorTrait, translate_points};
use crate::draw::DrawCommand;
use crate::view::View;
use kurbo::{Point, Vec2};
use uuid::Uuid;

/// A freehand stroke keeping every input point.
#[derive(Debug, Clone)]
pub struct Pencil {
    pub(crate) id: VectorId,
    points: Vec<Point>,
    pub style: VectorStyle,
    pub(crate) lifecycle: Lifecycle,
}

impl Pencil {
    /// Start a stroke at `start`.
    pub fn new(start: Point, style: VectorStyle) -> Self {
        Self::from_points(vec![start], style)
    }

    /// Rebuild a stroke from stored points.
    pub fn from_points(points: Vec<Point>, style: VectorStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl VectorTrait for Pencil {
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
        self.points.push(point);
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
