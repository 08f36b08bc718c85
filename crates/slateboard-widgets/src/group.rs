//! Button groups laid out on a grid, optionally exclusive.

use kurbo::{Point, Rect};
use slateboard_core::{Control, ControlContext, DrawCommand, MouseResult};

use crate::buttons::{Button, ButtonKind};
use crate::{sizing, theme};

/// Receives selection changes of an exclusive group.
pub trait GroupObserver {
    /// `old` and `new` are member indices in row-major order.
    fn on_selection_changed(&mut self, old: usize, new: usize, cx: &mut ControlContext<'_>);
}

impl<F> GroupObserver for F
where
    F: FnMut(usize, usize, &mut ControlContext<'_>),
{
    fn on_selection_changed(&mut self, old: usize, new: usize, cx: &mut ControlContext<'_>) {
        self(old, new, cx)
    }
}

/// A grid of buttons behaving as one control.
///
/// Members are laid out in equal cells (`None` leaves a gap) and receive
/// the events that land on them. An exclusive group is a radio group:
/// exactly one member is on at all times, members switch on when pressed,
/// and the only way to switch a member off is to switch another one on.
pub struct ButtonGroup {
    name: String,
    bounds: Rect,
    buttons: Vec<Button>,
    /// Selected member of an exclusive group.
    selected: Option<usize>,
    observers: Vec<Box<dyn GroupObserver>>,
    down: Option<usize>,
    over: Option<usize>,
}

impl std::fmt::Debug for ButtonGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonGroup")
            .field("name", &self.name)
            .field("buttons", &self.buttons)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl ButtonGroup {
    /// Lay out `grid` inside `bounds`, ignoring the members' own bounds.
    ///
    /// # Panics
    ///
    /// Panics if the grid holds no button.
    pub fn new(name: impl Into<String>, bounds: Rect, grid: Vec<Vec<Option<Button>>>) -> Self {
        let name = name.into();
        let rows = grid.len();
        let cols = grid.iter().map(Vec::len).max().unwrap_or(0);
        assert!(
            grid.iter().flatten().any(Option::is_some),
            "button group {name} has no buttons"
        );
        let cell_w = bounds.width() / cols as f64;
        let cell_h = bounds.height() / rows as f64;

        let mut buttons = Vec::new();
        for (i, row) in grid.into_iter().enumerate() {
            for (j, cell) in row.into_iter().enumerate() {
                let Some(mut button) = cell else { continue };
                let x0 = bounds.x0 + j as f64 * cell_w;
                let y0 = bounds.y0 + i as f64 * cell_h;
                button.set_bounds(Rect::new(x0, y0, x0 + cell_w, y0 + cell_h));
                buttons.push(button);
            }
        }
        log::info!("Created button group {name} with {} buttons", buttons.len());

        Self {
            name,
            bounds,
            buttons,
            selected: None,
            observers: Vec::new(),
            down: None,
            over: None,
        }
    }

    /// Turn the group into a radio group with member `initial` on.
    ///
    /// # Panics
    ///
    /// Panics if a member is not a toggle or `initial` is out of range.
    pub fn exclusive(mut self, initial: usize) -> Self {
        assert!(
            initial < self.buttons.len(),
            "button group {} has no member {initial}",
            self.name
        );
        for (index, button) in self.buttons.iter_mut().enumerate() {
            assert!(
                button.kind() == ButtonKind::Toggle,
                "exclusive group {} needs toggle buttons, {} is {:?}",
                self.name,
                button.name(),
                button.kind()
            );
            button.set_state(u32::from(index == initial));
        }
        self.selected = Some(initial);
        self
    }

    pub fn with_observer(mut self, observer: impl GroupObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn is_exclusive(&self) -> bool {
        self.selected.is_some()
    }

    /// Selected member of an exclusive group.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Index of the member named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.buttons.iter().position(|b| b.name() == name)
    }

    fn member_at(&self, pos: Point) -> Option<usize> {
        self.buttons.iter().position(|b| b.hit_test(pos))
    }

    /// Radio rule: switch `index` on and its sibling off.
    fn select(&mut self, index: usize, cx: &mut ControlContext<'_>) {
        let Some(old) = self.selected else {
            return;
        };
        if old == index {
            // The sole selected member cannot switch itself off.
            return;
        }
        log::debug!(
            "Group {} selection {} -> {}",
            self.name,
            self.buttons[old].name(),
            self.buttons[index].name()
        );
        self.buttons[index].apply(1, cx);
        self.buttons[old].apply(0, cx);
        self.selected = Some(index);
        for observer in &mut self.observers {
            observer.on_selection_changed(old, index, cx);
        }
    }

    fn update_hover(&mut self, pos: Option<Point>) {
        let under = pos.and_then(|p| self.member_at(p));
        if under == self.over {
            return;
        }
        if let Some(old) = self.over {
            self.buttons[old].set_hovered(false);
        }
        if let Some(new) = under {
            self.buttons[new].set_hovered(true);
        }
        self.over = under;
    }
}

impl Control for ButtonGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn mouse_down(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        let Some(index) = self.member_at(pos) else {
            return MouseResult::Unused;
        };
        if self.is_exclusive() {
            self.select(index, cx);
            return MouseResult::Released;
        }
        let result = self.buttons[index].mouse_down(pos, cx);
        if result == MouseResult::Captured {
            self.down = Some(index);
        }
        result
    }

    fn mouse_move(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        self.update_hover(Some(pos));
        match self.down {
            Some(index) => self.buttons[index].mouse_move(pos, cx),
            None => MouseResult::Unused,
        }
    }

    fn mouse_up(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        match self.down.take() {
            Some(index) => self.buttons[index].mouse_up(pos, cx),
            None => MouseResult::Unused,
        }
    }

    fn mouse_enter(&mut self, pos: Point) {
        self.update_hover(Some(pos));
    }

    fn mouse_leave(&mut self) {
        self.update_hover(None);
    }

    fn display(&self, out: &mut Vec<DrawCommand>) {
        for button in &self.buttons {
            button.display(out);
        }
        out.push(DrawCommand::pixel_rect(self.bounds, theme::BORDER, sizing::BORDER));
    }
}
