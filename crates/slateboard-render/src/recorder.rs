//! A renderer that records frames as draw commands.

use crate::renderer::{RenderResult, Renderer, RendererError};
use kurbo::Size;
use peniko::Color;
use serde::Serialize;
use slateboard_core::{DrawCommand, FixedPoint, SerializableColor};

/// One recorded frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedFrame {
    pub size: Size,
    pub background: SerializableColor,
    pub commands: Vec<DrawCommand>,
}

/// Records every frame instead of drawing it.
///
/// Useful for tests and for dumping what a board would show.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    current: Option<RecordedFrame>,
    frames: Vec<RecordedFrame>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished frames, oldest first.
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    /// Take the finished frames, leaving the recorder empty.
    pub fn take_frames(&mut self) -> Vec<RecordedFrame> {
        std::mem::take(&mut self.frames)
    }

    fn push(&mut self, command: DrawCommand) {
        match &mut self.current {
            Some(frame) => frame.commands.push(command),
            None => log::warn!("Dropping draw command outside a frame"),
        }
    }
}

impl Renderer for CommandRecorder {
    fn begin_frame(&mut self, size: Size, background: Color) -> RenderResult<()> {
        if self.current.is_some() {
            return Err(RendererError::RenderFailed(
                "begin_frame called twice without end_frame".into(),
            ));
        }
        self.current = Some(RecordedFrame {
            size,
            background: background.into(),
            commands: Vec::new(),
        });
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[FixedPoint], closed: bool, color: Color, width: u32) {
        self.push(DrawCommand::Polyline {
            points: points.to_vec(),
            closed,
            color: color.into(),
            width,
        });
    }

    fn draw_filled_polygon(&mut self, points: &[FixedPoint], color: Color) {
        self.push(DrawCommand::FilledPolygon {
            points: points.to_vec(),
            color: color.into(),
        });
    }

    fn draw_text(&mut self, text: &str, anchor: FixedPoint, scale: f64, color: Color) {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            scale,
            color: color.into(),
        });
    }

    fn draw_rect(&mut self, p1: FixedPoint, p2: FixedPoint, color: Color, width: u32) {
        self.push(DrawCommand::Rect {
            p1,
            p2,
            color: color.into(),
            width,
        });
    }

    fn end_frame(&mut self) -> RenderResult<()> {
        let frame = self
            .current
            .take()
            .ok_or_else(|| RendererError::RenderFailed("end_frame without begin_frame".into()))?;
        self.frames.push(frame);
        Ok(())
    }
}
