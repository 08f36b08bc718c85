//! Buttons: toggles, momentary actions and cycling selectors.

use kurbo::{Point, Rect};
use slateboard_core::{Control, ControlContext, DrawCommand, MouseResult, SerializableColor};

use crate::{sizing, theme};

/// How a button's state moves when it is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Flips between 0 (off) and 1 (on).
    Toggle,
    /// Fires once per click; the state rests at 0.
    Momentary,
    /// Steps through `0..n`, wrapping around.
    Cycle(u32),
}

impl ButtonKind {
    fn state_count(self) -> u32 {
        match self {
            ButtonKind::Toggle => 2,
            ButtonKind::Momentary => 1,
            ButtonKind::Cycle(n) => n,
        }
    }
}

/// When a click counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// On press; the button never captures the pointer.
    Press,
    /// On release inside the button. Releasing outside cancels.
    #[default]
    Release,
}

/// Receives a button's state changes.
///
/// A momentary button reports `0 -> 1` on every click and then falls back
/// to 0 silently.
pub trait ButtonObserver {
    fn on_state_changed(&mut self, old: u32, new: u32, cx: &mut ControlContext<'_>);
}

impl<F> ButtonObserver for F
where
    F: FnMut(u32, u32, &mut ControlContext<'_>),
{
    fn on_state_changed(&mut self, old: u32, new: u32, cx: &mut ControlContext<'_>) {
        self(old, new, cx)
    }
}

/// A clickable box with a label.
pub struct Button {
    name: String,
    bounds: Rect,
    kind: ButtonKind,
    state: u32,
    activation: Activation,
    hovered: bool,
    pressed: bool,
    color: SerializableColor,
    swatch: Option<SerializableColor>,
    observers: Vec<Box<dyn ButtonObserver>>,
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Button {
    /// # Panics
    ///
    /// Panics on `ButtonKind::Cycle(0)`.
    pub fn new(name: impl Into<String>, bounds: Rect, kind: ButtonKind) -> Self {
        let name = name.into();
        assert!(kind.state_count() > 0, "button {name} needs at least one state");
        log::debug!("Created {kind:?} button {name}");
        Self {
            name,
            bounds,
            kind,
            state: 0,
            activation: Activation::default(),
            hovered: false,
            pressed: false,
            color: theme::TEXT,
            swatch: None,
            observers: Vec::new(),
        }
    }

    pub fn toggle(name: impl Into<String>, bounds: Rect) -> Self {
        Self::new(name, bounds, ButtonKind::Toggle)
    }

    pub fn momentary(name: impl Into<String>, bounds: Rect) -> Self {
        Self::new(name, bounds, ButtonKind::Momentary)
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_color(mut self, color: SerializableColor) -> Self {
        self.color = color;
        self
    }

    /// Show a filled color sample inside the button.
    pub fn with_swatch(mut self, swatch: SerializableColor) -> Self {
        self.swatch = Some(swatch);
        self
    }

    /// Start in `state` without notifying anyone.
    pub fn with_state(mut self, state: u32) -> Self {
        self.set_state(state);
        self
    }

    pub fn with_observer(mut self, observer: impl ButtonObserver + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    pub fn add_observer(&mut self, observer: impl ButtonObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state != 0
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Set the state without notifying observers.
    ///
    /// # Panics
    ///
    /// Panics if `state` is outside the button's states.
    pub fn set_state(&mut self, state: u32) {
        assert!(
            state < self.kind.state_count(),
            "button {} has no state {state}",
            self.name
        );
        self.state = state;
    }

    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Move to `state` and notify observers if it changed.
    pub(crate) fn apply(&mut self, state: u32, cx: &mut ControlContext<'_>) {
        let old = self.state;
        self.set_state(state);
        if old != state {
            self.notify(old, state, cx);
        }
    }

    fn notify(&mut self, old: u32, new: u32, cx: &mut ControlContext<'_>) {
        for observer in &mut self.observers {
            observer.on_state_changed(old, new, cx);
        }
    }

    fn activate(&mut self, cx: &mut ControlContext<'_>) {
        log::debug!("Activated button {}", self.name);
        match self.kind {
            ButtonKind::Momentary => self.notify(0, 1, cx),
            ButtonKind::Toggle | ButtonKind::Cycle(_) => {
                let next = (self.state + 1) % self.kind.state_count();
                self.apply(next, cx);
            }
        }
    }

    fn label(&self) -> String {
        match self.kind {
            ButtonKind::Toggle => {
                format!("{}={}", self.name, if self.is_on() { "ON" } else { "OFF" })
            }
            ButtonKind::Momentary => self.name.clone(),
            ButtonKind::Cycle(_) => format!("{}={}", self.name, self.state),
        }
    }

    fn border_width(&self) -> u32 {
        let mut width = sizing::BORDER;
        if self.hovered {
            width += sizing::HOVER_EXTRA;
        }
        if self.pressed {
            width += sizing::PRESSED_EXTRA;
        }
        width
    }
}

impl Control for Button {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn mouse_down(&mut self, _pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        match self.activation {
            Activation::Press => {
                self.activate(cx);
                MouseResult::Released
            }
            Activation::Release => {
                self.pressed = true;
                MouseResult::Captured
            }
        }
    }

    fn mouse_move(&mut self, pos: Point, _cx: &mut ControlContext<'_>) -> MouseResult {
        if !self.pressed {
            return MouseResult::Unused;
        }
        self.hovered = self.bounds.contains(pos);
        MouseResult::Captured
    }

    fn mouse_up(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        if !self.pressed {
            return MouseResult::Unused;
        }
        self.pressed = false;
        if self.bounds.contains(pos) {
            self.activate(cx);
        }
        MouseResult::Released
    }

    fn mouse_enter(&mut self, _pos: Point) {
        self.hovered = true;
    }

    fn mouse_leave(&mut self) {
        self.hovered = false;
    }

    fn display(&self, out: &mut Vec<DrawCommand>) {
        let color = if self.is_on() { theme::ACCENT } else { self.color };
        if let Some(swatch) = self.swatch {
            let inner = self.bounds.inset(-sizing::SWATCH_INSET);
            out.push(DrawCommand::filled_pixel_rect(inner, swatch));
        }
        out.push(DrawCommand::pixel_rect(self.bounds, color, self.border_width()));
        let anchor = Point::new(
            self.bounds.x0 + sizing::LABEL_INSET,
            self.bounds.y0 + sizing::LABEL_INSET,
        );
        out.push(DrawCommand::pixel_text(self.label(), anchor, sizing::LABEL_SCALE, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 50.0, 20.0)
    }

    fn recorder() -> (Rc<RefCell<Vec<(u32, u32)>>>, impl ButtonObserver + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let observer = move |old: u32, new: u32, _cx: &mut ControlContext<'_>| {
            sink.borrow_mut().push((old, new));
        };
        (log, observer)
    }

    #[test]
    fn test_toggle_activates_on_release_inside() {
        let (log, observer) = recorder();
        let mut button = Button::toggle("grid", bounds()).with_observer(observer);
        let (mut surface, mut board) = (surface(), board());
        let mut cx = ControlContext {
            surface: &mut surface,
            board: &mut board,
        };

        assert_eq!(button.mouse_down(Point::new(5.0, 5.0), &mut cx), MouseResult::Captured);
        assert!(button.is_pressed());
        assert!(!button.is_on());
        assert_eq!(button.mouse_up(Point::new(6.0, 6.0), &mut cx), MouseResult::Released);
        assert!(button.is_on());

        button.mouse_down(Point::new(5.0, 5.0), &mut cx);
        button.mouse_up(Point::new(5.0, 5.0), &mut cx);
        assert!(!button.is_on());
        assert_eq!(log.borrow().as_slice(), &[(0, 1), (1, 0)]);
    }

    #[test]
    fn test_release_outside_cancels() {
        let (log, observer) = recorder();
        let mut button = Button::toggle("grid", bounds()).with_observer(observer);
        let (mut surface, mut board) = (surface(), board());
        let mut cx = ControlContext {
            surface: &mut surface,
            board: &mut board,
        };
        button.mouse_down(Point::new(5.0, 5.0), &mut cx);
        assert_eq!(button.mouse_move(Point::new(90.0, 5.0), &mut cx), MouseResult::Captured);
        assert!(!button.is_hovered());
        assert_eq!(button.mouse_up(Point::new(90.0, 5.0), &mut cx), MouseResult::Released);
        assert!(!button.is_on());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_momentary_fires_and_rests() {
        let (log, observer) = recorder();
        let mut button = Button::momentary("undo", bounds())
            .with_activation(Activation::Press)
            .with_observer(observer);
        let (mut surface, mut board) = (surface(), board());
        let mut cx = ControlContext {
            surface: &mut surface,
            board: &mut board,
        };
        assert_eq!(button.mouse_down(Point::new(1.0, 1.0), &mut cx), MouseResult::Released);
        assert_eq!(button.mouse_down(Point::new(1.0, 1.0), &mut cx), MouseResult::Released);
        assert_eq!(button.state(), 0);
        assert_eq!(log.borrow().as_slice(), &[(0, 1), (0, 1)]);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut button = Button::new("mode", bounds(), ButtonKind::Cycle(3));
        let (mut surface, mut board) = (surface(), board());
        let mut cx = ControlContext {
            surface: &mut surface,
            board: &mut board,
        };
        let mut seen = Vec::new();
        for _ in 0..4 {
            button.mouse_down(Point::new(1.0, 1.0), &mut cx);
            button.mouse_up(Point::new(1.0, 1.0), &mut cx);
            seen.push(button.state());
        }
        assert_eq!(seen, vec![1, 2, 0, 1]);
    }

    #[test]
    fn test_labels_and_hover_border() {
        let mut button = Button::toggle("snap", bounds());
        let mut out = Vec::new();
        button.display(&mut out);
        assert!(matches!(&out[1], DrawCommand::Text { text, .. } if text == "snap=OFF"));
        assert!(matches!(out[0], DrawCommand::Rect { width: 1, .. }));

        button.mouse_enter(Point::new(1.0, 1.0));
        out.clear();
        button.display(&mut out);
        assert!(matches!(out[0], DrawCommand::Rect { width: 3, .. }));

        let cycle = Button::new("mode", bounds(), ButtonKind::Cycle(4)).with_state(2);
        out.clear();
        cycle.display(&mut out);
        assert!(matches!(&out[1], DrawCommand::Text { text, .. } if text == "mode=2"));
    }

    #[test]
    #[should_panic(expected = "has no state")]
    fn test_invalid_state_panics() {
        Button::toggle("snap", bounds()).set_state(2);
    }
}
