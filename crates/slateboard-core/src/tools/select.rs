//! Selection tool: marquee-select, drag to move, delete.

use super::{Tool, ToolContext, ToolPoint};
use crate::input::{Key, MouseResult};
use crate::store::VectorStore;
use crate::vectors::VectorId;
use kurbo::{Point, Rect};

/// Grab margin around a selected vector, in pixels.
const GRAB_MARGIN_PX: f64 = 4.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Mode {
    #[default]
    Idle,
    Marquee { start: Point, current: Point },
    Moving { last: Point },
}

#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    mode: Mode,
}

impl SelectTool {
    /// Marquee rectangle while one is being dragged.
    pub fn marquee(&self) -> Option<Rect> {
        match self.mode {
            Mode::Marquee { start, current } => Some(Rect::from_points(start, current)),
            _ => None,
        }
    }

    fn grabs_selection(store: &VectorStore, point: Point, zoom: f64) -> bool {
        let margin = GRAB_MARGIN_PX / zoom;
        store
            .selected()
            .iter()
            .any(|v| v.bounds().inflate(margin, margin).contains(point))
    }
}

impl Tool for SelectTool {
    fn on_gesture_start(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult {
        let zoom = cx.surface.view().zoom();
        self.mode = if Self::grabs_selection(cx.store, at.board, zoom) {
            Mode::Moving { last: at.board }
        } else {
            cx.store.deselect_all(true);
            Mode::Marquee {
                start: at.board,
                current: at.board,
            }
        };
        MouseResult::Captured
    }

    fn on_gesture_move(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult {
        match &mut self.mode {
            Mode::Idle => MouseResult::Unused,
            Mode::Marquee { current, .. } => {
                *current = at.board;
                MouseResult::Captured
            }
            Mode::Moving { last } => {
                let delta = at.board - *last;
                *last = at.board;
                for vector in cx.store.selected_mut() {
                    vector.translate(delta);
                }
                MouseResult::Captured
            }
        }
    }

    fn on_gesture_end(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult {
        let result = match self.mode {
            Mode::Idle => return MouseResult::Unused,
            Mode::Marquee { start, .. } => {
                let area = Rect::from_points(start, at.board);
                let ids: Vec<VectorId> = cx
                    .store
                    .query_intersecting(area)
                    .into_iter()
                    .map(|v| v.id())
                    .collect();
                let count = cx.store.select(&ids);
                log::debug!("Marquee selected {count} vectors");
                MouseResult::Released
            }
            Mode::Moving { .. } => {
                self.on_gesture_move(at, cx);
                MouseResult::Released
            }
        };
        self.mode = Mode::Idle;
        result
    }

    fn on_key(&mut self, key: Key, cx: &mut ToolContext<'_>) -> bool {
        match key {
            Key::Delete | Key::Backspace if !cx.store.selected().is_empty() => {
                let count = cx.store.delete_selected();
                log::debug!("Deleted {count} selected vectors");
                true
            }
            Key::Escape if !cx.store.selected().is_empty() => {
                cx.store.deselect_all(false);
                true
            }
            _ => false,
        }
    }

    fn deactivate(&mut self, store: &mut VectorStore) {
        self.mode = Mode::Idle;
        store.deselect_all(true);
    }
}
