//! Per-viewport state: the current view and the pan protocol.

use crate::view::View;
use kurbo::{Point, Size};

/// Snapshot taken when a pan gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanAnchor {
    start: Point,
    view: View,
}

/// One pixel viewport onto the board.
///
/// Every pan, zoom or resize replaces the [`View`] wholesale. At most one
/// pan gesture may be active at a time.
#[derive(Debug, Clone)]
pub struct Surface {
    name: String,
    view: View,
    pan: Option<PanAnchor>,
}

impl Surface {
    pub fn new(name: impl Into<String>, view: View) -> Self {
        Self {
            name: name.into(),
            view,
            pan: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// Viewport size in pixels.
    pub fn size(&self) -> Size {
        self.view.size()
    }

    /// Resize the viewport, keeping the visible board area inscribed.
    ///
    /// An empty or non-finite size (a minimized window) keeps the current
    /// view, so restoring the window later resizes from the last real one.
    pub fn resize(&mut self, size: Size) {
        let usable = size.width > 0.0
            && size.height > 0.0
            && size.width.is_finite()
            && size.height.is_finite();
        if !usable {
            log::debug!(
                "Ignoring resize of surface {} to {}x{}",
                self.name,
                size.width,
                size.height
            );
            return;
        }
        log::debug!("Resizing surface {} to {}x{}", self.name, size.width, size.height);
        self.view = self.view.resized(size);
    }

    /// Zoom around `anchor` (pixels).
    pub fn zoom_to(&mut self, zoom: f64, anchor: Point) {
        self.view = self.view.zoomed(zoom, anchor);
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Begin a pan gesture at pixel `start`.
    ///
    /// # Panics
    ///
    /// Panics if a pan gesture is already active on this surface.
    pub fn start_pan(&mut self, start: Point) {
        assert!(
            self.pan.is_none(),
            "start_pan called on surface {} while a pan is already active",
            self.name
        );
        self.pan = Some(PanAnchor {
            start,
            view: self.view,
        });
    }

    /// Move the active pan gesture to pixel `to`.
    ///
    /// # Panics
    ///
    /// Panics if no pan gesture is active.
    pub fn pan_to(&mut self, to: Point) {
        let Some(anchor) = self.pan else {
            panic!("pan_to called on surface {} without start_pan", self.name);
        };
        self.view = anchor.view.panned(to - anchor.start);
    }

    pub fn end_pan(&mut self) {
        self.pan = None;
    }
}
