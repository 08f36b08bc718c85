//! Text tool: click to place a label, then type.

use super::{Tool, ToolContext, ToolPoint, snapped, style_for};
use crate::input::{Key, MouseResult};
use crate::store::VectorStore;
use crate::vectors::{Text, Vector, VectorKind};

#[derive(Debug, Clone, Default)]
pub struct TextTool {
    pressed: bool,
}

impl TextTool {
    /// Commit the label being typed, or drop it if nothing was typed.
    fn finish_pending(store: &mut VectorStore) {
        let empty = match store.in_progress() {
            None => return,
            Some(vector) => vector.as_text().is_none_or(|text| text.is_empty()),
        };
        if empty {
            store.cancel_in_progress();
        } else {
            store.finish_in_progress();
        }
    }

    fn editing(store: &mut VectorStore) -> Option<&mut Text> {
        store.in_progress_mut().and_then(Vector::as_text_mut)
    }
}

impl Tool for TextTool {
    fn on_gesture_start(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult {
        Self::finish_pending(cx.store);
        let anchor = snapped(at.board, cx.settings);
        cx.store.start_vector(Vector::start(
            VectorKind::Text,
            anchor,
            style_for(cx.settings),
            cx.settings.font_size,
        ));
        self.pressed = true;
        MouseResult::Captured
    }

    fn on_gesture_move(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult {
        if !self.pressed {
            return MouseResult::Unused;
        }
        let anchor = snapped(at.board, cx.settings);
        if let Some(vector) = cx.store.in_progress_mut() {
            vector.add_point(anchor);
        }
        MouseResult::Captured
    }

    fn on_gesture_end(&mut self, _at: ToolPoint, _cx: &mut ToolContext<'_>) -> MouseResult {
        if !self.pressed {
            return MouseResult::Unused;
        }
        self.pressed = false;
        MouseResult::Released
    }

    fn on_key(&mut self, key: Key, cx: &mut ToolContext<'_>) -> bool {
        let Some(text) = Self::editing(cx.store) else {
            return false;
        };
        match key {
            Key::Char(c) if !c.is_control() => text.push_char(c),
            Key::Char(_) => return false,
            Key::Backspace => {
                text.pop_char();
            }
            Key::Enter => Self::finish_pending(cx.store),
            Key::Escape => {
                cx.store.cancel_in_progress();
            }
            Key::Delete => return false,
        }
        true
    }

    fn deactivate(&mut self, store: &mut VectorStore) {
        self.pressed = false;
        Self::finish_pending(store);
    }
}
