//! Mouse-capture state machine for one viewport.
//!
//! Every event goes to exactly one target. While idle, controls are
//! offered the event topmost first, and the active tool gets whatever no
//! control claims. A target that captures owns the gesture until it
//! releases it.

use crate::board::Board;
use crate::control::{Control, ControlContext};
use crate::draw::DrawCommand;
use crate::input::{Key, MouseResult, PointerEvent, PointerKind};
use crate::surface::Surface;
use crate::tools::ToolPoint;
use crate::view::View;
use kurbo::Point;

/// A target that can own a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// Index into the router's controls.
    Control(usize),
    Tool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Captured(Owner),
}

/// Where an event ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Control(usize),
    Tool,
    Ignored,
}

impl From<Owner> for Routed {
    fn from(owner: Owner) -> Self {
        match owner {
            Owner::Control(index) => Routed::Control(index),
            Owner::Tool => Routed::Tool,
        }
    }
}

#[derive(Default)]
pub struct InteractionRouter {
    controls: Vec<Box<dyn Control>>,
    state: CaptureState,
    hovered: Option<usize>,
}

impl std::fmt::Debug for InteractionRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.controls.iter().map(|c| c.name()).collect();
        f.debug_struct("InteractionRouter")
            .field("controls", &names)
            .field("state", &self.state)
            .field("hovered", &self.hovered)
            .finish()
    }
}

impl InteractionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a control. Later controls take priority.
    pub fn add_control(&mut self, control: Box<dyn Control>) -> usize {
        self.controls.push(control);
        self.controls.len() - 1
    }

    pub fn controls(&self) -> &[Box<dyn Control>] {
        &self.controls
    }

    /// Index of the control named `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.controls.iter().position(|c| c.name() == name)
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Control currently under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Let every control catch up with `view` and `board`.
    pub fn sync(&mut self, view: &View, board: &Board) {
        for control in &mut self.controls {
            control.sync(view, board);
        }
    }

    /// Route one pointer event.
    ///
    /// # Panics
    ///
    /// Panics if the owner of a captured gesture answers
    /// [`MouseResult::Unused`].
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        surface: &mut Surface,
        board: &mut Board,
    ) -> Routed {
        self.sync(surface.view(), board);
        if event.kind == PointerKind::Move {
            self.update_hover(event.position);
        }

        if let CaptureState::Captured(owner) = self.state {
            let result = self.dispatch(owner, event, surface, board);
            match result {
                MouseResult::Unused => panic!(
                    "{owner:?} returned Unused for {:?} while it owned the gesture",
                    event.kind
                ),
                MouseResult::Captured => {}
                MouseResult::Released => {
                    log::debug!("{owner:?} released the pointer on {}", surface.name());
                    self.state = CaptureState::Idle;
                }
            }
            return owner.into();
        }

        for index in (0..self.controls.len()).rev() {
            if !self.controls[index].hit_test(event.position) {
                continue;
            }
            let owner = Owner::Control(index);
            match self.dispatch(owner, event, surface, board) {
                MouseResult::Unused => continue,
                MouseResult::Captured => {
                    log::debug!(
                        "Control {} captured the pointer on {}",
                        self.controls[index].name(),
                        surface.name()
                    );
                    self.state = CaptureState::Captured(owner);
                }
                MouseResult::Released => {}
            }
            return owner.into();
        }

        match self.dispatch(Owner::Tool, event, surface, board) {
            MouseResult::Unused => Routed::Ignored,
            MouseResult::Captured => {
                self.state = CaptureState::Captured(Owner::Tool);
                Routed::Tool
            }
            MouseResult::Released => Routed::Tool,
        }
    }

    /// Route a key press: a capturing control first, then the active tool.
    pub fn handle_key(&mut self, key: Key, surface: &mut Surface, board: &mut Board) -> Routed {
        if let CaptureState::Captured(Owner::Control(index)) = self.state {
            let mut cx = ControlContext { surface, board };
            if self.controls[index].key(key, &mut cx) {
                return Routed::Control(index);
            }
            let ControlContext { surface, board } = cx;
            return Self::key_to_tool(key, surface, board);
        }
        Self::key_to_tool(key, surface, board)
    }

    fn key_to_tool(key: Key, surface: &mut Surface, board: &mut Board) -> Routed {
        if board.tools.key(key, surface, &mut board.store) {
            Routed::Tool
        } else {
            Routed::Ignored
        }
    }

    /// Append every control's drawing commands, lowest priority first.
    pub fn display(&self, out: &mut Vec<DrawCommand>) {
        for control in &self.controls {
            control.display(out);
        }
    }

    fn update_hover(&mut self, pos: Point) {
        let under = (0..self.controls.len())
            .rev()
            .find(|&i| self.controls[i].hit_test(pos));
        if under == self.hovered {
            return;
        }
        if let Some(old) = self.hovered {
            self.controls[old].mouse_leave();
        }
        if let Some(new) = under {
            self.controls[new].mouse_enter(pos);
        }
        self.hovered = under;
    }

    fn dispatch(
        &mut self,
        owner: Owner,
        event: PointerEvent,
        surface: &mut Surface,
        board: &mut Board,
    ) -> MouseResult {
        let pos = event.position;
        match owner {
            Owner::Control(index) => {
                let control = &mut self.controls[index];
                let mut cx = ControlContext { surface, board };
                match event.kind {
                    PointerKind::Down => control.mouse_down(pos, &mut cx),
                    PointerKind::Move => control.mouse_move(pos, &mut cx),
                    PointerKind::Up => control.mouse_up(pos, &mut cx),
                }
            }
            Owner::Tool => {
                let at = ToolPoint {
                    board: surface.view().pixel_to_board(pos),
                    pixel: pos,
                };
                board.tools.pointer(event.kind, at, surface, &mut board.store)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectors::VectorKind;
    use crate::view::View;
    use kurbo::{Rect, Size};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records every call and captures on press until release.
    struct Scripted {
        name: String,
        bounds: Rect,
        log: Log,
        on_down: MouseResult,
        on_move: MouseResult,
    }

    impl Scripted {
        fn boxed(name: &str, bounds: Rect, log: &Log) -> Box<Self> {
            Box::new(Self {
                name: name.to_string(),
                bounds,
                log: log.clone(),
                on_down: MouseResult::Captured,
                on_move: MouseResult::Captured,
            })
        }

        fn record(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{what}", self.name));
        }
    }

    impl Control for Scripted {
        fn name(&self) -> &str {
            &self.name
        }

        fn bounds(&self) -> Rect {
            self.bounds
        }

        fn mouse_down(&mut self, _pos: Point, _cx: &mut ControlContext<'_>) -> MouseResult {
            self.record("down");
            self.on_down
        }

        fn mouse_move(&mut self, _pos: Point, _cx: &mut ControlContext<'_>) -> MouseResult {
            self.record("move");
            self.on_move
        }

        fn mouse_up(&mut self, _pos: Point, _cx: &mut ControlContext<'_>) -> MouseResult {
            self.record("up");
            MouseResult::Released
        }

        fn mouse_enter(&mut self, _pos: Point) {
            self.record("enter");
        }

        fn mouse_leave(&mut self) {
            self.record("leave");
        }

        fn display(&self, _out: &mut Vec<DrawCommand>) {}
    }

    /// Remembers the zoom it was last synced with.
    struct ZoomWatcher {
        seen: Rc<RefCell<Vec<f64>>>,
    }

    impl Control for ZoomWatcher {
        fn name(&self) -> &str {
            "watcher"
        }

        fn bounds(&self) -> Rect {
            Rect::ZERO
        }

        fn mouse_down(&mut self, _pos: Point, _cx: &mut ControlContext<'_>) -> MouseResult {
            MouseResult::Unused
        }

        fn mouse_move(&mut self, _pos: Point, _cx: &mut ControlContext<'_>) -> MouseResult {
            MouseResult::Unused
        }

        fn mouse_up(&mut self, _pos: Point, _cx: &mut ControlContext<'_>) -> MouseResult {
            MouseResult::Unused
        }

        fn sync(&mut self, view: &View, _board: &Board) {
            self.seen.borrow_mut().push(view.zoom());
        }

        fn display(&self, _out: &mut Vec<DrawCommand>) {}
    }

    fn setup() -> (InteractionRouter, Surface, Board, Log) {
        let surface = Surface::new("test", View::new(Point::ZERO, 1.0, Size::new(100.0, 100.0)));
        (InteractionRouter::new(), surface, Board::default(), Log::default())
    }

    #[test]
    fn test_controls_sync_before_each_event() {
        let (mut router, mut surface, mut board, _log) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        router.add_control(Box::new(ZoomWatcher { seen: seen.clone() }));

        router.handle_pointer(PointerEvent::moved(5.0, 5.0), &mut surface, &mut board);
        surface.zoom_to(3.0, Point::ZERO);
        router.handle_pointer(PointerEvent::moved(6.0, 5.0), &mut surface, &mut board);
        router.sync(&View::new(Point::ZERO, 0.5, Size::new(10.0, 10.0)), &board);
        assert_eq!(seen.borrow().as_slice(), [1.0, 3.0, 0.5]);
    }

    #[test]
    fn test_capture_is_exclusive_until_release() {
        let (mut router, mut surface, mut board, log) = setup();
        let a = router.add_control(Scripted::boxed("a", Rect::new(0.0, 0.0, 10.0, 10.0), &log));
        router.add_control(Scripted::boxed("b", Rect::new(20.0, 0.0, 30.0, 10.0), &log));

        let routed = router.handle_pointer(PointerEvent::down(5.0, 5.0), &mut surface, &mut board);
        assert_eq!(routed, Routed::Control(a));
        assert_eq!(router.state(), CaptureState::Captured(Owner::Control(a)));

        // Dragging over `b` still feeds `a`, and the tool draws nothing.
        let routed = router.handle_pointer(PointerEvent::moved(25.0, 5.0), &mut surface, &mut board);
        assert_eq!(routed, Routed::Control(a));
        let routed = router.handle_pointer(PointerEvent::up(60.0, 60.0), &mut surface, &mut board);
        assert_eq!(routed, Routed::Control(a));
        assert_eq!(router.state(), CaptureState::Idle);
        assert!(board.store.is_empty());

        let calls: Vec<String> = log
            .borrow()
            .iter()
            .filter(|c| !c.ends_with("enter") && !c.ends_with("leave"))
            .cloned()
            .collect();
        assert_eq!(calls, vec!["a:down", "a:move", "a:up"]);
    }

    #[test]
    fn test_later_control_has_priority() {
        let (mut router, mut surface, mut board, log) = setup();
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        router.add_control(Scripted::boxed("under", bounds, &log));
        let top = router.add_control(Scripted::boxed("over", bounds, &log));
        let routed = router.handle_pointer(PointerEvent::down(5.0, 5.0), &mut surface, &mut board);
        assert_eq!(routed, Routed::Control(top));
        assert_eq!(log.borrow().as_slice(), ["over:down"]);
    }

    #[test]
    fn test_unused_control_falls_through() {
        let (mut router, mut surface, mut board, log) = setup();
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let under = router.add_control(Scripted::boxed("under", bounds, &log));
        let mut passive = Scripted::boxed("passive", bounds, &log);
        passive.on_down = MouseResult::Unused;
        router.add_control(passive);
        let routed = router.handle_pointer(PointerEvent::down(5.0, 5.0), &mut surface, &mut board);
        assert_eq!(routed, Routed::Control(under));
        assert_eq!(log.borrow().as_slice(), ["passive:down", "under:down"]);
    }

    #[test]
    #[should_panic(expected = "returned Unused")]
    fn test_captured_owner_returning_unused_panics() {
        let (mut router, mut surface, mut board, log) = setup();
        let mut flaky = Scripted::boxed("flaky", Rect::new(0.0, 0.0, 10.0, 10.0), &log);
        flaky.on_move = MouseResult::Unused;
        router.add_control(flaky);
        router.handle_pointer(PointerEvent::down(5.0, 5.0), &mut surface, &mut board);
        router.handle_pointer(PointerEvent::moved(6.0, 6.0), &mut surface, &mut board);
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let (mut router, mut surface, mut board, log) = setup();
        let a = router.add_control(Scripted::boxed("a", Rect::new(0.0, 0.0, 10.0, 10.0), &log));
        router.add_control(Scripted::boxed("b", Rect::new(20.0, 0.0, 30.0, 10.0), &log));

        router.handle_pointer(PointerEvent::moved(5.0, 5.0), &mut surface, &mut board);
        assert_eq!(router.hovered(), Some(a));
        router.handle_pointer(PointerEvent::moved(6.0, 5.0), &mut surface, &mut board);
        router.handle_pointer(PointerEvent::moved(25.0, 5.0), &mut surface, &mut board);
        router.handle_pointer(PointerEvent::moved(50.0, 50.0), &mut surface, &mut board);
        assert_eq!(router.hovered(), None);

        let hover: Vec<String> = log
            .borrow()
            .iter()
            .filter(|c| c.ends_with("enter") || c.ends_with("leave"))
            .cloned()
            .collect();
        assert_eq!(hover, vec!["a:enter", "a:leave", "b:enter", "b:leave"]);
    }

    #[test]
    fn test_unclaimed_gesture_draws_with_tool() {
        let (mut router, mut surface, mut board, log) = setup();
        router.add_control(Scripted::boxed("corner", Rect::new(90.0, 90.0, 100.0, 100.0), &log));
        surface.set_view(View::new(Point::new(-10.0, -10.0), 2.0, Size::new(100.0, 100.0)));

        let events = [
            PointerEvent::down(20.0, 20.0),
            PointerEvent::moved(22.0, 22.0),
            PointerEvent::moved(24.0, 20.0),
            // Passing over the control does not steal the tool's gesture.
            PointerEvent::moved(95.0, 95.0),
            PointerEvent::up(24.0, 20.0),
        ];
        for event in events {
            assert_eq!(router.handle_pointer(event, &mut surface, &mut board), Routed::Tool);
        }
        assert_eq!(router.state(), CaptureState::Idle);
        assert!(board.store.in_progress().is_none());
        let stroke = &board.store.committed()[0];
        assert_eq!(stroke.kind(), VectorKind::Pencil);
        assert_eq!(
            &stroke.points()[..3],
            &[Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)]
        );
        assert!(log.borrow().iter().all(|c| !c.ends_with("down")));
    }

    #[test]
    fn test_idle_move_outside_controls_is_ignored() {
        let (mut router, mut surface, mut board, _log) = setup();
        let routed = router.handle_pointer(PointerEvent::moved(1.0, 1.0), &mut surface, &mut board);
        assert_eq!(routed, Routed::Ignored);
    }

    #[test]
    fn test_keys_go_to_tool_when_no_control_captured() {
        let (mut router, mut surface, mut board, _log) = setup();
        board.set_tool(crate::tools::ToolKind::Text);
        router.handle_pointer(PointerEvent::down(1.0, 1.0), &mut surface, &mut board);
        router.handle_pointer(PointerEvent::up(1.0, 1.0), &mut surface, &mut board);
        assert_eq!(
            router.handle_key(Key::Char('x'), &mut surface, &mut board),
            Routed::Tool
        );
        assert_eq!(board.store.in_progress().unwrap().as_text().unwrap().text, "x");
    }
}
