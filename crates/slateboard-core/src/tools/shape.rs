//! Drawing tool for strokes, lines, rectangles and circles.

use super::{Tool, ToolContext, ToolPoint, snapped, style_for};
use crate::input::MouseResult;
use crate::vectors::{Vector, VectorKind};
use kurbo::Point;

/// Draws one vector per gesture.
#[derive(Debug, Clone)]
pub struct ShapeTool {
    kind: VectorKind,
    drawing: bool,
}

impl ShapeTool {
    pub fn new(kind: VectorKind) -> Self {
        Self {
            kind,
            drawing: false,
        }
    }

    pub fn kind(&self) -> VectorKind {
        self.kind
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Freehand strokes follow the pointer exactly; other shapes snap.
    fn input_point(&self, at: ToolPoint, cx: &ToolContext<'_>) -> Point {
        match self.kind {
            VectorKind::Pencil => at.board,
            _ => snapped(at.board, cx.settings),
        }
    }
}

impl Tool for ShapeTool {
    fn on_gesture_start(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult {
        if let Some(orphan) = cx.store.cancel_in_progress() {
            log::warn!(
                "Discarding orphaned {:?} vector {} from an unfinished gesture",
                orphan.kind(),
                orphan.id()
            );
        }
        let start = self.input_point(at, cx);
        let vector = Vector::start(self.kind, start, style_for(cx.settings), cx.settings.font_size);
        cx.store.start_vector(vector);
        self.drawing = true;
        MouseResult::Captured
    }

    fn on_gesture_move(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult {
        if !self.drawing {
            return MouseResult::Unused;
        }
        let point = self.input_point(at, cx);
        if let Some(vector) = cx.store.in_progress_mut() {
            vector.add_point(point);
        }
        MouseResult::Captured
    }

    fn on_gesture_end(&mut self, _at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult {
        if !self.drawing {
            return MouseResult::Unused;
        }
        self.drawing = false;
        cx.store.finish_in_progress();
        MouseResult::Released
    }
}
