//! Renderer trait abstraction.

use kurbo::{Rect, Size};
use peniko::Color;
use slateboard_core::{DrawCommand, FixedPoint};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No grid (plain background).
    None,
    /// Full grid lines.
    #[default]
    Lines,
    /// Only intersection dots.
    Dots,
}

/// Context for a single render frame.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Background color.
    pub background_color: Color,
    /// Grid display style.
    pub grid_style: GridStyle,
    /// Grid spacing in board units.
    pub grid_size: f64,
    pub grid_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Selection rectangle (marquee) in board coordinates.
    pub selection_rect: Option<Rect>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    /// Create a new render context.
    pub fn new() -> Self {
        Self {
            background_color: Color::from_rgba8(250, 250, 250, 255),
            grid_style: GridStyle::Lines,
            grid_size: slateboard_core::GRID_SIZE,
            grid_color: Color::from_rgba8(220, 220, 220, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            selection_rect: None,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_grid_color(mut self, color: Color) -> Self {
        self.grid_color = color;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Set the selection rectangle.
    pub fn with_selection_rect(mut self, rect: Option<Rect>) -> Self {
        self.selection_rect = rect;
        self
    }
}

/// Trait for rendering backends.
///
/// Coordinates arrive in fixed-point pixels. A frame is bracketed by
/// [`begin_frame`](Self::begin_frame) and [`end_frame`](Self::end_frame).
pub trait Renderer: Send + Sync {
    /// Start a frame, clearing to `background`.
    fn begin_frame(&mut self, size: Size, background: Color) -> RenderResult<()>;

    fn draw_polyline(&mut self, points: &[FixedPoint], closed: bool, color: Color, width: u32);

    fn draw_filled_polygon(&mut self, points: &[FixedPoint], color: Color);

    /// Draw `text` with its top-left corner at `anchor`; `scale` is the
    /// glyph height in pixels.
    fn draw_text(&mut self, text: &str, anchor: FixedPoint, scale: f64, color: Color);

    fn draw_rect(&mut self, p1: FixedPoint, p2: FixedPoint, color: Color, width: u32);

    /// Finish the frame and present it.
    fn end_frame(&mut self) -> RenderResult<()>;

    /// Dispatch one command to the matching primitive.
    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Polyline {
                points,
                closed,
                color,
                width,
            } => self.draw_polyline(points, *closed, (*color).into(), *width),
            DrawCommand::FilledPolygon { points, color } => {
                self.draw_filled_polygon(points, (*color).into())
            }
            DrawCommand::Text {
                text,
                anchor,
                scale,
                color,
            } => self.draw_text(text, *anchor, *scale, (*color).into()),
            DrawCommand::Rect {
                p1,
                p2,
                color,
                width,
            } => self.draw_rect(*p1, *p2, (*color).into(), *width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let ctx = RenderContext::new()
            .with_grid(GridStyle::Dots)
            .with_grid_size(50.0)
            .with_selection_rect(Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(ctx.grid_style, GridStyle::Dots);
        assert_eq!(ctx.grid_size, 50.0);
        assert!(ctx.selection_rect.is_some());
    }
}
