//! Interactive regions of a viewport that are not the drawing tool.

use crate::board::Board;
use crate::draw::DrawCommand;
use crate::input::{Key, MouseResult};
use crate::surface::Surface;
use crate::view::View;
use kurbo::{Point, Rect};

/// What a control may touch while handling an event.
pub struct ControlContext<'a> {
    /// The viewport the control lives in.
    pub surface: &'a mut Surface,
    pub board: &'a mut Board,
}

/// A button, slider or other widget placed in pixel space.
///
/// The router only offers an idle event to a control whose
/// [`hit_test`](Self::hit_test) passes. Once a control returns
/// [`MouseResult::Captured`] it receives every event until it returns
/// [`MouseResult::Released`], wherever the pointer is, and must never
/// answer [`MouseResult::Unused`] in the meantime.
pub trait Control {
    fn name(&self) -> &str;

    /// Pixel bounding box.
    fn bounds(&self) -> Rect;

    fn hit_test(&self, pos: Point) -> bool {
        self.bounds().contains(pos)
    }

    fn mouse_down(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult;

    fn mouse_move(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult;

    fn mouse_up(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult;

    /// The pointer moved into the control.
    fn mouse_enter(&mut self, _pos: Point) {}

    /// The pointer left the control.
    fn mouse_leave(&mut self) {}

    /// Refresh anything derived from the viewport's view or the board,
    /// such as a tab tracking the zoom or an outline tracking
    /// [`Board::focus`]. Called before each pointer event is routed.
    fn sync(&mut self, _view: &View, _board: &Board) {}

    /// Handle a key press while the control owns the gesture.
    fn key(&mut self, _key: Key, _cx: &mut ControlContext<'_>) -> bool {
        false
    }

    /// Append this control's drawing commands.
    fn display(&self, out: &mut Vec<DrawCommand>);
}
