//! Vector definitions for the board.

mod cache;
mod circle;
mod line;
mod pencil;
mod rectangle;
mod text;

pub use cache::ProjectionCache;
pub use circle::{CIRCLE_SAMPLES, Circle};
pub use line::Line;
pub use pencil::Pencil;
pub use rectangle::Rectangle;
pub use text::{CHAR_WIDTH_RATIO, Text};

use crate::draw::DrawCommand;
use crate::geometry::bounds_of;
use crate::view::View;
use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Unique identifier for a vector.
pub type VectorId = Uuid;

/// Tolerance used when comparing point coordinates.
pub const POINT_TOLERANCE: f64 = 1e-9;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke properties shared by every vector kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorStyle {
    pub color: SerializableColor,
    /// Stroke width in pixels.
    pub thickness: u32,
}

impl Default for VectorStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            thickness: 2,
        }
    }
}

impl VectorStyle {
    pub fn new(color: SerializableColor, thickness: u32) -> Self {
        Self { color, thickness }
    }
}

/// The closed set of vector kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VectorKind {
    Pencil,
    Line,
    Circle,
    Rectangle,
    Text,
}

impl VectorKind {
    /// Class tag used by the persistence format.
    pub fn class_name(self) -> &'static str {
        match self {
            VectorKind::Pencil => "PencilVec",
            VectorKind::Line => "LineVec",
            VectorKind::Circle => "CircleVec",
            VectorKind::Rectangle => "RectangleVec",
            VectorKind::Text => "TextVec",
        }
    }
}

/// Lifecycle flags carried by every vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Lifecycle {
    /// Seconds since the Unix epoch at which the gesture finished.
    pub(crate) finalized_at: Option<f64>,
    /// Centroid fixed at finalization, moved along with the points.
    pub(crate) centroid: Option<Point>,
    pub(crate) highlighted: bool,
    pub(crate) visible: bool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            finalized_at: None,
            centroid: None,
            highlighted: false,
            visible: true,
        }
    }
}

/// Behaviour every vector kind provides.
pub trait VectorTrait {
    /// Get the vector's unique identifier.
    fn id(&self) -> VectorId;

    /// Raw input points in board coordinates.
    fn points(&self) -> &[Point];

    fn style(&self) -> &VectorStyle;

    fn style_mut(&mut self) -> &mut VectorStyle;

    fn lifecycle(&self) -> &Lifecycle;

    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    /// Grow the vector from a new input point.
    fn add_point(&mut self, point: Point);

    /// Move every point by `delta`.
    fn translate(&mut self, delta: Vec2);

    /// Board-space bounding box.
    fn bounds(&self) -> Rect {
        bounds_of(self.points()).unwrap_or(Rect::ZERO)
    }

    /// Drawable primitives for this vector seen through `view`.
    fn project(&mut self, view: &View) -> Vec<DrawCommand>;
}

/// A drawable entity on the board.
#[derive(Debug, Clone)]
pub enum Vector {
    Pencil(Pencil),
    Line(Line),
    Circle(Circle),
    Rectangle(Rectangle),
    Text(Text),
}

impl Vector {
    fn as_dyn(&self) -> &dyn VectorTrait {
        match self {
            Vector::Pencil(v) => v,
            Vector::Line(v) => v,
            Vector::Circle(v) => v,
            Vector::Rectangle(v) => v,
            Vector::Text(v) => v,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn VectorTrait {
        match self {
            Vector::Pencil(v) => v,
            Vector::Line(v) => v,
            Vector::Circle(v) => v,
            Vector::Rectangle(v) => v,
            Vector::Text(v) => v,
        }
    }

    /// Start a new vector of `kind` at `start`.
    ///
    /// Text vectors start with an empty string and `font_size`.
    pub fn start(kind: VectorKind, start: Point, style: VectorStyle, font_size: f64) -> Self {
        match kind {
            VectorKind::Pencil => Vector::Pencil(Pencil::new(start, style)),
            VectorKind::Line => Vector::Line(Line::new(start, style)),
            VectorKind::Circle => Vector::Circle(Circle::new(start, style)),
            VectorKind::Rectangle => Vector::Rectangle(Rectangle::new(start, style)),
            VectorKind::Text => Vector::Text(Text::new(start, String::new(), font_size, style)),
        }
    }

    pub fn kind(&self) -> VectorKind {
        match self {
            Vector::Pencil(_) => VectorKind::Pencil,
            Vector::Line(_) => VectorKind::Line,
            Vector::Circle(_) => VectorKind::Circle,
            Vector::Rectangle(_) => VectorKind::Rectangle,
            Vector::Text(_) => VectorKind::Text,
        }
    }

    pub fn id(&self) -> VectorId {
        self.as_dyn().id()
    }

    pub fn points(&self) -> &[Point] {
        self.as_dyn().points()
    }

    pub fn style(&self) -> &VectorStyle {
        self.as_dyn().style()
    }

    pub fn style_mut(&mut self) -> &mut VectorStyle {
        self.as_dyn_mut().style_mut()
    }

    pub fn bounds(&self) -> Rect {
        self.as_dyn().bounds()
    }

    pub fn add_point(&mut self, point: Point) {
        self.as_dyn_mut().add_point(point);
    }

    /// Move the vector (and its fixed centroid) by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.as_dyn_mut().translate(delta);
        if let Some(centroid) = self.lifecycle_mut().centroid.as_mut() {
            *centroid += delta;
        }
    }

    /// Stamp the finish time and fix the centroid.
    pub fn finalize(&mut self) {
        let centroid = centroid_of(self.points());
        let lifecycle = self.lifecycle_mut();
        lifecycle.finalized_at = Some(now_seconds());
        lifecycle.centroid = centroid;
    }

    pub fn is_finalized(&self) -> bool {
        self.lifecycle().finalized_at.is_some()
    }

    /// Finish time in seconds since the Unix epoch.
    pub fn finalized_at(&self) -> Option<f64> {
        self.lifecycle().finalized_at
    }

    pub fn centroid(&self) -> Option<Point> {
        self.lifecycle().centroid
    }

    pub fn is_highlighted(&self) -> bool {
        self.lifecycle().highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.lifecycle_mut().highlighted = highlighted;
    }

    pub fn is_visible(&self) -> bool {
        self.lifecycle().visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.lifecycle_mut().visible = visible;
    }

    /// Project through `view`, emitting nothing when the vector is off-screen.
    pub fn project(&mut self, view: &View) -> Vec<DrawCommand> {
        if !view.sees(self.bounds()) {
            return Vec::new();
        }
        self.as_dyn_mut().project(view)
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Vector::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Vector::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Same kind, style and geometry, points compared within [`POINT_TOLERANCE`].
    pub fn approx_eq(&self, other: &Vector) -> bool {
        if self.kind() != other.kind() || self.style() != other.style() {
            return false;
        }
        if let (Some(a), Some(b)) = (self.as_text(), other.as_text()) {
            if a.text != b.text || (a.font_size - b.font_size).abs() > POINT_TOLERANCE {
                return false;
            }
        }
        let (a, b) = (self.points(), other.points());
        a.len() == b.len()
            && a.iter().zip(b).all(|(p, q)| {
                (p.x - q.x).abs() <= POINT_TOLERANCE && (p.y - q.y).abs() <= POINT_TOLERANCE
            })
    }

    pub(crate) fn lifecycle(&self) -> &Lifecycle {
        self.as_dyn().lifecycle()
    }

    pub(crate) fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        self.as_dyn_mut().lifecycle_mut()
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

/// Two-point reduction shared by lines, circles and rectangles.
///
/// The first point ever added seeds both endpoints; every later point only
/// replaces the second one.
pub(crate) fn push_endpoint(points: &mut Vec<Point>, point: Point) {
    match points.len() {
        0 => points.extend([point, point]),
        _ => {
            points.truncate(1);
            points.push(point);
        }
    }
}

pub(crate) fn translate_points(points: &mut [Point], delta: Vec2) {
    for point in points {
        *point += delta;
    }
}

fn centroid_of(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    Some((sum / points.len() as f64).to_point())
}

fn now_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}
