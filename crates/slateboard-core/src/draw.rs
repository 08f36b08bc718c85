//! Drawing commands emitted by vectors and controls.
//!
//! The core never touches pixels. Everything visible is described as a list
//! of [`DrawCommand`]s in fixed-point pixel coordinates, which a renderer
//! turns into actual output.

use crate::geometry::FixedPoint;
use crate::vectors::SerializableColor;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Polyline {
        points: Vec<FixedPoint>,
        closed: bool,
        color: SerializableColor,
        width: u32,
    },
    FilledPolygon {
        points: Vec<FixedPoint>,
        color: SerializableColor,
    },
    Text {
        text: String,
        anchor: FixedPoint,
        /// Glyph height in pixels.
        scale: f64,
        color: SerializableColor,
    },
    Rect {
        p1: FixedPoint,
        p2: FixedPoint,
        color: SerializableColor,
        width: u32,
    },
}

impl DrawCommand {
    /// Outline of a pixel-space rectangle.
    pub fn pixel_rect(rect: Rect, color: SerializableColor, width: u32) -> Self {
        DrawCommand::Rect {
            p1: FixedPoint::from_pixels(Point::new(rect.x0, rect.y0)),
            p2: FixedPoint::from_pixels(Point::new(rect.x1, rect.y1)),
            color,
            width,
        }
    }

    /// Filled pixel-space rectangle.
    pub fn filled_pixel_rect(rect: Rect, color: SerializableColor) -> Self {
        let corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ];
        DrawCommand::FilledPolygon {
            points: corners.into_iter().map(FixedPoint::from_pixels).collect(),
            color,
        }
    }

    /// Text anchored at a pixel position.
    pub fn pixel_text(
        text: impl Into<String>,
        anchor: Point,
        scale: f64,
        color: SerializableColor,
    ) -> Self {
        DrawCommand::Text {
            text: text.into(),
            anchor: FixedPoint::from_pixels(anchor),
            scale,
            color,
        }
    }

    /// Straight pixel-space segment.
    pub fn pixel_line(from: Point, to: Point, color: SerializableColor, width: u32) -> Self {
        DrawCommand::Polyline {
            points: vec![FixedPoint::from_pixels(from), FixedPoint::from_pixels(to)],
            closed: false,
            color,
            width,
        }
    }
}
