//! Hand tool: drag to pan the viewport.

use super::{Tool, ToolContext, ToolPoint};
use crate::input::MouseResult;

#[derive(Debug, Clone, Default)]
pub struct PanTool {
    active: bool,
}

impl Tool for PanTool {
    fn on_gesture_start(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult {
        if self.active {
            cx.surface.end_pan();
        }
        cx.surface.start_pan(at.pixel);
        self.active = true;
        MouseResult::Captured
    }

    fn on_gesture_move(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult {
        if !self.active {
            return MouseResult::Unused;
        }
        cx.surface.pan_to(at.pixel);
        MouseResult::Captured
    }

    fn on_gesture_end(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult {
        if !self.active {
            return MouseResult::Unused;
        }
        cx.surface.pan_to(at.pixel);
        cx.surface.end_pan();
        self.active = false;
        MouseResult::Released
    }
}
