//! Outline of the board's focus region, shown in an overview viewport.
//!
//! The box tracks [`Board::focus`]. Presses inside it fall through to the
//! tool, so drawing in the overview works as usual. Presses outside pan the
//! overview and drag the focus along with it, which pans every viewport
//! showing the focus. The lower-right corner resizes the focus.

use kurbo::{Point, Rect, Vec2};
use slateboard_core::{Board, Control, ControlContext, DrawCommand, MouseResult, View};

use crate::{PanArea, sizing, theme};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    /// Panning; the focus and view origin when the press started.
    Pan { focus: Rect, origin: Point },
    /// Dragging the corner; the focus corner that stays put.
    Resize { anchor: Point },
}

#[derive(Debug, Clone)]
pub struct ZoomBox {
    area: PanArea,
    has_focus: bool,
    gesture: Gesture,
}

impl ZoomBox {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            area: PanArea::new(name, Rect::ZERO).inside_out(),
            has_focus: false,
            gesture: Gesture::Idle,
        }
    }

    /// Pixel square around the resize corner.
    fn handle(&self) -> Rect {
        let bounds = self.area.bounds();
        Rect::from_center_size(Point::new(bounds.x1, bounds.y1), (sizing::HANDLE, sizing::HANDLE))
    }

    fn place(&mut self, focus: Rect, view: &View) {
        let p1 = view.board_to_pixel_f(Point::new(focus.x0, focus.y0));
        let p2 = view.board_to_pixel_f(Point::new(focus.x1, focus.y1));
        self.area.set_bounds(Rect::from_points(p1, p2));
    }

    fn follow_pan(&self, focus: Rect, origin: Point, cx: &mut ControlContext<'_>) {
        let shift: Vec2 = cx.surface.view().origin() - origin;
        cx.board.focus = Some(focus + shift);
    }

    fn resize_to(&mut self, anchor: Point, pos: Point, cx: &mut ControlContext<'_>) {
        let view = *cx.surface.view();
        let min = sizing::MIN_BOX / view.zoom();
        let corner = view.pixel_to_board(pos);
        let focus = Rect::new(
            anchor.x,
            anchor.y,
            corner.x.max(anchor.x + min),
            corner.y.max(anchor.y + min),
        );
        cx.board.focus = Some(focus);
        self.place(focus, &view);
    }
}

impl Control for ZoomBox {
    fn name(&self) -> &str {
        self.area.name()
    }

    fn bounds(&self) -> Rect {
        self.area.bounds()
    }

    fn hit_test(&self, pos: Point) -> bool {
        self.has_focus && (self.handle().contains(pos) || self.area.hit_test(pos))
    }

    fn sync(&mut self, view: &View, board: &Board) {
        if self.gesture != Gesture::Idle {
            return;
        }
        self.has_focus = board.focus.is_some();
        if let Some(focus) = board.focus {
            self.place(focus, view);
        }
    }

    fn mouse_down(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        let Some(focus) = cx.board.focus else {
            return MouseResult::Unused;
        };
        if self.handle().contains(pos) {
            log::debug!("Resizing focus {focus:?} from {}", cx.surface.name());
            self.gesture = Gesture::Resize {
                anchor: Point::new(focus.x0, focus.y0),
            };
            return MouseResult::Captured;
        }
        self.gesture = Gesture::Pan {
            focus,
            origin: cx.surface.view().origin(),
        };
        self.area.mouse_down(pos, cx)
    }

    fn mouse_move(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        match self.gesture {
            Gesture::Idle => MouseResult::Unused,
            Gesture::Pan { focus, origin } => {
                let result = self.area.mouse_move(pos, cx);
                self.follow_pan(focus, origin, cx);
                result
            }
            Gesture::Resize { anchor } => {
                self.resize_to(anchor, pos, cx);
                MouseResult::Captured
            }
        }
    }

    fn mouse_up(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Idle => MouseResult::Unused,
            Gesture::Pan { focus, origin } => {
                let result = self.area.mouse_up(pos, cx);
                self.follow_pan(focus, origin, cx);
                result
            }
            Gesture::Resize { anchor } => {
                self.resize_to(anchor, pos, cx);
                MouseResult::Released
            }
        }
    }

    fn display(&self, out: &mut Vec<DrawCommand>) {
        if !self.has_focus {
            return;
        }
        let width = if self.gesture == Gesture::Idle {
            sizing::BORDER + sizing::HOVER_EXTRA
        } else {
            sizing::BORDER + sizing::PRESSED_EXTRA
        };
        out.push(DrawCommand::pixel_rect(self.area.bounds(), theme::ACCENT, width));
        out.push(DrawCommand::filled_pixel_rect(self.handle(), theme::ACCENT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use slateboard_core::{InteractionRouter, PointerEvent, Routed};

    fn focused_board() -> Board {
        let mut board = board();
        board.focus = Some(Rect::new(50.0, 50.0, 100.0, 80.0));
        board
    }

    #[test]
    fn test_outline_follows_focus() {
        let mut zoom_box = ZoomBox::new("zoom box");
        let (surface, mut board) = (surface(), board());
        zoom_box.sync(surface.view(), &board);
        assert!(!zoom_box.hit_test(Point::new(1.0, 1.0)));
        let mut out = Vec::new();
        zoom_box.display(&mut out);
        assert!(out.is_empty());

        board.focus = Some(Rect::new(10.0, 20.0, 30.0, 40.0));
        let view = View::new(Point::new(10.0, 10.0), 2.0, surface.size());
        zoom_box.sync(&view, &board);
        assert_eq!(zoom_box.bounds(), Rect::new(0.0, 20.0, 40.0, 60.0));
        assert!(zoom_box.hit_test(Point::new(100.0, 100.0)));
        assert!(!zoom_box.hit_test(Point::new(20.0, 40.0)));
        zoom_box.display(&mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_press_inside_draws() {
        let mut router = InteractionRouter::new();
        router.add_control(Box::new(ZoomBox::new("zoom box")));
        let (mut surface, mut board) = (surface(), focused_board());

        for event in [
            PointerEvent::down(60.0, 60.0),
            PointerEvent::moved(70.0, 65.0),
            PointerEvent::up(70.0, 65.0),
        ] {
            assert_eq!(router.handle_pointer(event, &mut surface, &mut board), Routed::Tool);
        }
        assert_eq!(board.store.committed().len(), 1);
        assert_eq!(board.focus, Some(Rect::new(50.0, 50.0, 100.0, 80.0)));
    }

    #[test]
    fn test_press_outside_pans_view_and_focus() {
        let mut router = InteractionRouter::new();
        let index = router.add_control(Box::new(ZoomBox::new("zoom box")));
        let (mut surface, mut board) = (surface(), focused_board());

        for event in [
            PointerEvent::down(150.0, 150.0),
            PointerEvent::moved(160.0, 150.0),
            PointerEvent::up(170.0, 160.0),
        ] {
            assert_eq!(
                router.handle_pointer(event, &mut surface, &mut board),
                Routed::Control(index)
            );
        }
        assert_eq!(surface.view().origin(), Point::new(-20.0, -10.0));
        // The focus moved with the view, so the box stays put on screen.
        assert_eq!(board.focus, Some(Rect::new(30.0, 40.0, 80.0, 70.0)));
        router.sync(surface.view(), &board);
        assert_eq!(router.controls()[index].bounds(), Rect::new(50.0, 50.0, 100.0, 80.0));
        assert!(board.store.is_empty());
    }

    #[test]
    fn test_corner_resizes_focus() {
        let mut router = InteractionRouter::new();
        router.add_control(Box::new(ZoomBox::new("zoom box")));
        let (mut surface, mut board) = (surface(), focused_board());

        router.handle_pointer(PointerEvent::down(101.0, 79.0), &mut surface, &mut board);
        router.handle_pointer(PointerEvent::moved(140.0, 120.0), &mut surface, &mut board);
        assert_eq!(board.focus, Some(Rect::new(50.0, 50.0, 140.0, 120.0)));
        // Never smaller than the minimum box.
        router.handle_pointer(PointerEvent::up(0.0, 0.0), &mut surface, &mut board);
        let min = sizing::MIN_BOX;
        assert_eq!(board.focus, Some(Rect::new(50.0, 50.0, 50.0 + min, 50.0 + min)));
        assert!(board.store.is_empty());
    }
}
