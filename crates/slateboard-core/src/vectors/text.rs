//! Text labels placed on the board.

use super::{Lifecycle, VectorId, VectorStyle, VectorTrait};
use crate::draw::DrawCommand;
use crate::view::View;
use kurbo::{Point, Rect, Vec2};
use uuid::Uuid;

/// Approximate glyph advance as a fraction of the font size.
pub const CHAR_WIDTH_RATIO: f64 = 0.6;

/// A text label anchored at its top-left corner.
///
/// `font_size` is in board units, so the text scales with zoom.
#[derive(Debug, Clone)]
pub struct Text {
    pub(crate) id: VectorId,
    points: Vec<Point>,
    pub text: String,
    pub font_size: f64,
    pub style: VectorStyle,
    pub(crate) lifecycle: Lifecycle,
}

impl Text {
    pub fn new(anchor: Point, text: String, font_size: f64, style: VectorStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![anchor],
            text,
            font_size,
            style,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn anchor(&self) -> Point {
        self.points[0]
    }

    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    /// Remove the last character, returning it.
    pub fn pop_char(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl VectorTrait for Text {
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

    /// Text keeps a single anchor, so a new point moves it.
    fn add_point(&mut self, point: Point) {
        self.points[0] = point;
    }

    fn translate(&mut self, delta: Vec2) {
        self.points[0] += delta;
    }

    fn bounds(&self) -> Rect {
        let anchor = self.anchor();
        let width = self.text.chars().count() as f64 * CHAR_WIDTH_RATIO * self.font_size;
        Rect::new(anchor.x, anchor.y, anchor.x + width, anchor.y + self.font_size)
    }

    fn project(&mut self, view: &View) -> Vec<DrawCommand> {
        vec![DrawCommand::Text {
            text: self.text.clone(),
            anchor: view.board_to_pixel(self.anchor()),
            scale: self.font_size * view.zoom(),
            color: self.style.color,
        }]
    }
}
