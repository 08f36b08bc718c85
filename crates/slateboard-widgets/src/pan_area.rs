//! A region that pans its viewport while dragged.
//!
//! An inside-out area reacts to everything *outside* its outline instead,
//! leaving the inside to the controls and tool underneath.

use kurbo::{Point, Rect};
use slateboard_core::{Control, ControlContext, DrawCommand, MouseResult};

use crate::{sizing, theme};

#[derive(Debug, Clone)]
pub struct PanArea {
    name: String,
    bounds: Rect,
    inside_out: bool,
    active: bool,
}

impl PanArea {
    pub fn new(name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            name: name.into(),
            bounds,
            inside_out: false,
            active: false,
        }
    }

    /// Pan on presses outside `bounds` and let presses inside through.
    pub fn inside_out(mut self) -> Self {
        self.inside_out = true;
        self
    }

    pub fn is_inside_out(&self) -> bool {
        self.inside_out
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Move the outline, e.g. to follow a region of the board.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

impl Control for PanArea {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn hit_test(&self, pos: Point) -> bool {
        self.bounds.contains(pos) != self.inside_out
    }

    fn mouse_down(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        cx.surface.start_pan(pos);
        self.active = true;
        MouseResult::Captured
    }

    fn mouse_move(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        if !self.active {
            return MouseResult::Unused;
        }
        cx.surface.pan_to(pos);
        MouseResult::Captured
    }

    fn mouse_up(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        if !self.active {
            return MouseResult::Unused;
        }
        cx.surface.pan_to(pos);
        cx.surface.end_pan();
        self.active = false;
        MouseResult::Released
    }

    fn display(&self, out: &mut Vec<DrawCommand>) {
        let color = if self.active { theme::ACCENT } else { theme::BORDER };
        out.push(DrawCommand::pixel_rect(self.bounds, color, sizing::BORDER));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use slateboard_core::{InteractionRouter, PointerEvent, Routed};

    #[test]
    fn test_drag_inside_pans_view() {
        let mut router = InteractionRouter::new();
        let index = router.add_control(Box::new(PanArea::new(
            "pan",
            Rect::new(0.0, 180.0, 200.0, 200.0),
        )));
        let (mut surface, mut board) = (surface(), board());

        let events = [
            PointerEvent::down(10.0, 190.0),
            PointerEvent::moved(60.0, 10.0),
            PointerEvent::up(110.0, 190.0),
        ];
        for event in events {
            assert_eq!(
                router.handle_pointer(event, &mut surface, &mut board),
                Routed::Control(index)
            );
        }
        assert_eq!(surface.view().origin(), Point::new(-100.0, 0.0));
        assert!(!surface.is_panning());
        assert!(board.store.is_empty());
    }

    #[test]
    fn test_inside_out_pans_from_outside_only() {
        let mut router = InteractionRouter::new();
        let index = router.add_control(Box::new(
            PanArea::new("zoom", Rect::new(50.0, 50.0, 150.0, 150.0)).inside_out(),
        ));
        let (mut surface, mut board) = (surface(), board());

        // Inside: the pencil draws.
        for event in [
            PointerEvent::down(60.0, 60.0),
            PointerEvent::moved(70.0, 70.0),
            PointerEvent::up(80.0, 60.0),
        ] {
            assert_eq!(router.handle_pointer(event, &mut surface, &mut board), Routed::Tool);
        }
        assert_eq!(board.store.committed().len(), 1);
        assert_eq!(surface.view().origin(), Point::ZERO);

        // Outside: the view pans, even when dragged across the inside.
        for event in [
            PointerEvent::down(10.0, 10.0),
            PointerEvent::moved(100.0, 100.0),
            PointerEvent::up(30.0, 20.0),
        ] {
            assert_eq!(
                router.handle_pointer(event, &mut surface, &mut board),
                Routed::Control(index)
            );
        }
        assert_eq!(surface.view().origin(), Point::new(-20.0, -10.0));
        assert_eq!(board.store.committed().len(), 1);
    }
}
