//! Slider: drag a tab along a track to pick a value.

use kurbo::{Point, Rect};
use slateboard_core::{
    Board, Control, ControlContext, DrawCommand, MouseResult, SerializableColor, View,
};

use crate::{sizing, theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Receives value changes while the slider is dragged.
pub trait SliderObserver {
    fn on_value_changed(&mut self, old: f64, new: f64, cx: &mut ControlContext<'_>);
}

impl<F> SliderObserver for F
where
    F: FnMut(f64, f64, &mut ControlContext<'_>),
{
    fn on_value_changed(&mut self, old: f64, new: f64, cx: &mut ControlContext<'_>) {
        self(old, new, cx)
    }
}

/// A value picker over evenly spaced stops.
///
/// The stops sit at equal intervals along the track, first stop at the
/// start. With interpolation the value is piecewise linear between stops,
/// otherwise it is the nearest stop.
pub struct Slider {
    label: String,
    bounds: Rect,
    orientation: Orientation,
    values: Vec<f64>,
    interpolate: bool,
    /// Tab position along the track, in `[0, 1]`.
    position: f64,
    dragging: bool,
    color: SerializableColor,
    observers: Vec<Box<dyn SliderObserver>>,
    /// Value the tab follows between drags.
    tracking: Option<Box<dyn Fn(&View) -> f64>>,
}

impl std::fmt::Debug for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("label", &self.label)
            .field("values", &self.values)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl Slider {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(
        label: impl Into<String>,
        bounds: Rect,
        orientation: Orientation,
        values: Vec<f64>,
        interpolate: bool,
        initial_position: f64,
    ) -> Self {
        let label = label.into();
        assert!(!values.is_empty(), "slider {label} needs at least one value");
        let ascending = values.windows(2).all(|w| w[0] <= w[1]);
        let descending = values.windows(2).all(|w| w[0] >= w[1]);
        if interpolate && !(ascending || descending) {
            log::warn!("Slider {label} interpolates over non-monotonic values {values:?}");
        }
        log::info!("Created {orientation:?} slider {label}");
        Self {
            label,
            bounds,
            orientation,
            values,
            interpolate,
            position: initial_position.clamp(0.0, 1.0),
            dragging: false,
            color: theme::TEXT,
            observers: Vec::new(),
            tracking: None,
        }
    }

    pub fn with_color(mut self, color: SerializableColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_observer(mut self, observer: impl SliderObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Keep the tab on whatever `value` reads from the view, so changes
    /// made elsewhere (fitting, linked viewports) show up on the track.
    pub fn tracking(mut self, value: impl Fn(&View) -> f64 + 'static) -> Self {
        self.tracking = Some(Box::new(value));
        self
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value_at(self.position)
    }

    /// Value the slider would have at relative position `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        let last = self.values.len() - 1;
        if last == 0 {
            return self.values[0];
        }
        let scaled = t.clamp(0.0, 1.0) * last as f64;
        if !self.interpolate {
            return self.values[scaled.round() as usize];
        }
        let index = (scaled.floor() as usize).min(last - 1);
        let frac = scaled - index as f64;
        let (a, b) = (self.values[index], self.values[index + 1]);
        a + (b - a) * frac
    }

    /// Relative position at which the slider shows `value`, if any.
    pub fn position_for(&self, value: f64) -> Option<f64> {
        let last = self.values.len() - 1;
        if last == 0 {
            return (self.values[0] == value).then_some(0.0);
        }
        if !self.interpolate {
            let index = self.values.iter().position(|v| *v == value)?;
            return Some(index as f64 / last as f64);
        }
        self.values.windows(2).enumerate().find_map(|(i, w)| {
            let (lo, hi) = (w[0].min(w[1]), w[0].max(w[1]));
            if value < lo || value > hi {
                return None;
            }
            let frac = if w[1] == w[0] { 0.0 } else { (value - w[0]) / (w[1] - w[0]) };
            Some((i as f64 + frac) / last as f64)
        })
    }

    /// Move the tab without notifying observers.
    pub fn set_position(&mut self, position: f64) {
        self.position = position.clamp(0.0, 1.0);
    }

    /// Move the tab to `value` without notifying observers.
    ///
    /// A value no position shows puts the tab at the nearer end.
    pub fn show_value(&mut self, value: f64) {
        let position = self.position_for(value).unwrap_or_else(|| {
            let first = self.values[0];
            let last = self.values[self.values.len() - 1];
            if (value - first).abs() <= (value - last).abs() {
                0.0
            } else {
                1.0
            }
        });
        self.set_position(position);
    }

    /// `"label: value"`, with three decimals when interpolating.
    pub fn label(&self) -> String {
        let value = self.value();
        if self.interpolate {
            format!("{}: {value:.3}", self.label)
        } else {
            format!("{}: {value}", self.label)
        }
    }

    fn track(&self) -> (Point, Point) {
        let b = self.bounds;
        let m = sizing::TRACK_MARGIN;
        match self.orientation {
            Orientation::Horizontal => {
                let y = b.center().y;
                (Point::new(b.x0 + m, y), Point::new(b.x1 - m, y))
            }
            Orientation::Vertical => {
                let x = b.center().x;
                let top = b.y0 + m + sizing::LABEL_SCALE;
                (Point::new(x, top), Point::new(x, b.y1 - m))
            }
        }
    }

    fn relative(&self, pos: Point) -> f64 {
        let (start, end) = self.track();
        let (lo, hi, v) = match self.orientation {
            Orientation::Horizontal => (start.x, end.x, pos.x),
            Orientation::Vertical => (start.y, end.y, pos.y),
        };
        if hi <= lo {
            return 0.0;
        }
        ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
    }

    fn tab(&self) -> Rect {
        let (start, end) = self.track();
        let center = start.lerp(end, self.position);
        let (w, h) = match self.orientation {
            Orientation::Horizontal => (sizing::TAB_LENGTH, sizing::TAB_BREADTH),
            Orientation::Vertical => (sizing::TAB_BREADTH, sizing::TAB_LENGTH),
        };
        Rect::from_center_size(center, (w, h))
    }

    fn drag_to(&mut self, pos: Point, cx: &mut ControlContext<'_>) {
        let old = self.value();
        self.position = self.relative(pos);
        let new = self.value();
        if new != old {
            for observer in &mut self.observers {
                observer.on_value_changed(old, new, cx);
            }
        }
    }
}

impl Control for Slider {
    fn name(&self) -> &str {
        &self.label
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn sync(&mut self, view: &View, _board: &Board) {
        if self.dragging {
            return;
        }
        if let Some(value) = self.tracking.as_ref().map(|track| track(view)) {
            self.show_value(value);
        }
    }

    fn mouse_down(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        self.dragging = true;
        self.drag_to(pos, cx);
        MouseResult::Captured
    }

    fn mouse_move(&mut self, pos: Point, cx: &mut ControlContext<'_>) -> MouseResult {
        if !self.dragging {
            return MouseResult::Unused;
        }
        self.drag_to(pos, cx);
        MouseResult::Captured
    }

    fn mouse_up(&mut self, _pos: Point, _cx: &mut ControlContext<'_>) -> MouseResult {
        if !self.dragging {
            return MouseResult::Unused;
        }
        self.dragging = false;
        MouseResult::Released
    }

    fn display(&self, out: &mut Vec<DrawCommand>) {
        let (start, end) = self.track();
        out.push(DrawCommand::pixel_line(start, end, self.color, sizing::TRACK_WIDTH));
        let tab_width = if self.dragging {
            sizing::BORDER + sizing::PRESSED_EXTRA
        } else {
            sizing::BORDER + sizing::HOVER_EXTRA
        };
        out.push(DrawCommand::pixel_rect(self.tab(), theme::ACCENT, tab_width));
        let anchor = Point::new(
            self.bounds.x0 + sizing::LABEL_INSET,
            self.bounds.y0 + sizing::LABEL_INSET,
        );
        out.push(DrawCommand::pixel_text(self.label(), anchor, sizing::LABEL_SCALE, self.color));
        out.push(DrawCommand::pixel_rect(self.bounds, theme::BORDER, sizing::BORDER));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use kurbo::Size;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Track runs from x=12 to x=112.
    fn horizontal(values: Vec<f64>, interpolate: bool) -> Slider {
        Slider::new(
            "width",
            Rect::new(0.0, 0.0, 124.0, 40.0),
            Orientation::Horizontal,
            values,
            interpolate,
            0.0,
        )
    }

    #[test]
    fn test_interpolates_between_stops() {
        let mut slider = horizontal(vec![1.0, 2.0, 4.0], true);
        assert!((slider.value_at(0.25) - 1.5).abs() < 1e-12);
        assert!((slider.value_at(0.75) - 3.0).abs() < 1e-12);
        assert_eq!(slider.value_at(1.0), 4.0);
        slider.set_position(0.75);
        assert_eq!(slider.label(), "width: 3.000");
    }

    #[test]
    fn test_nearest_stop_without_interpolation() {
        let mut slider = horizontal(vec![1.0, 2.0, 3.0, 5.0, 8.0, 13.0], false);
        assert_eq!(slider.value_at(0.0), 1.0);
        assert_eq!(slider.value_at(0.45), 3.0);
        assert_eq!(slider.value_at(1.0), 13.0);
        slider.set_position(0.8);
        assert_eq!(slider.label(), "width: 8");
    }

    #[test]
    fn test_position_for_inverts_value() {
        let zoom = horizontal(vec![0.25, 0.5, 1.0, 2.0, 4.0, 8.0], true);
        let t = zoom.position_for(1.0).unwrap();
        assert!((t - 0.4).abs() < 1e-12);
        let t = zoom.position_for(3.0).unwrap();
        assert!((zoom.value_at(t) - 3.0).abs() < 1e-9);
        assert!(zoom.position_for(100.0).is_none());

        let widths = horizontal(vec![1.0, 2.0, 3.0], false);
        assert_eq!(widths.position_for(3.0), Some(1.0));
        assert_eq!(widths.position_for(2.5), None);
    }

    #[test]
    fn test_drag_clamps_and_notifies() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        let mut slider = horizontal(vec![0.0, 10.0], true).with_observer(
            move |old: f64, new: f64, _cx: &mut ControlContext<'_>| {
                sink.borrow_mut().push((old, new));
            },
        );
        let (mut surface, mut board) = (surface(), board());
        let mut cx = ControlContext {
            surface: &mut surface,
            board: &mut board,
        };

        assert_eq!(slider.mouse_down(Point::new(62.0, 20.0), &mut cx), MouseResult::Captured);
        assert!((slider.value() - 5.0).abs() < 1e-12);
        assert_eq!(slider.mouse_move(Point::new(500.0, 90.0), &mut cx), MouseResult::Captured);
        assert_eq!(slider.value(), 10.0);
        assert_eq!(slider.mouse_move(Point::new(-50.0, 0.0), &mut cx), MouseResult::Captured);
        assert_eq!(slider.value(), 0.0);
        assert_eq!(slider.mouse_up(Point::ZERO, &mut cx), MouseResult::Released);
        assert_eq!(slider.mouse_move(Point::new(62.0, 20.0), &mut cx), MouseResult::Unused);
        assert_eq!(changes.borrow().len(), 3);
    }

    #[test]
    fn test_vertical_track_runs_top_down() {
        let slider = Slider::new(
            "zoom",
            Rect::new(0.0, 0.0, 40.0, 200.0),
            Orientation::Vertical,
            vec![1.0, 2.0],
            true,
            0.5,
        );
        let top = 12.0 + sizing::LABEL_SCALE;
        let middle = (top + 188.0) / 2.0;
        assert!((slider.relative(Point::new(20.0, middle)) - 0.5).abs() < 1e-12);
        assert_eq!(slider.relative(Point::new(20.0, 0.0)), 0.0);
    }

    #[test]
    fn test_show_value_clamps_to_nearer_end() {
        let mut zoom = horizontal(vec![0.25, 1.0, 4.0], true);
        zoom.show_value(2.5);
        assert!((zoom.value() - 2.5).abs() < 1e-9);
        zoom.show_value(0.1);
        assert_eq!(zoom.position(), 0.0);
        zoom.show_value(40.0);
        assert_eq!(zoom.position(), 1.0);
    }

    #[test]
    fn test_tracking_follows_view_between_drags() {
        let mut zoom = horizontal(vec![1.0, 2.0, 4.0], true).tracking(|view: &View| view.zoom());
        let (mut surface, mut board) = (surface(), board());
        zoom.sync(&View::new(Point::ZERO, 2.0, surface.size()), &board);
        assert!((zoom.position() - 0.5).abs() < 1e-12);

        let mut cx = ControlContext {
            surface: &mut surface,
            board: &mut board,
        };
        zoom.mouse_down(Point::new(12.0, 20.0), &mut cx);
        // Mid-drag the pointer wins over the view.
        zoom.sync(&View::new(Point::ZERO, 4.0, Size::new(200.0, 200.0)), &Board::default());
        assert_eq!(zoom.position(), 0.0);
        zoom.mouse_up(Point::new(12.0, 20.0), &mut cx);
        zoom.sync(&View::new(Point::ZERO, 4.0, Size::new(200.0, 200.0)), &Board::default());
        assert_eq!(zoom.position(), 1.0);
    }

    #[test]
    fn test_single_value() {
        let slider = horizontal(vec![7.0], true);
        assert_eq!(slider.value(), 7.0);
        assert_eq!(slider.position_for(7.0), Some(0.0));
    }
}
