//! Where each toolbar control sits, relative to its viewport.

use kurbo::{Rect, Size};

/// A box given as fractions of the viewport's width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeRect {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl RelativeRect {
    pub const fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }

    /// Pixel box inside a viewport of `size`.
    pub fn to_pixels(self, size: Size) -> Rect {
        Rect::new(
            (self.x.0 * size.width).round(),
            (self.y.0 * size.height).round(),
            (self.x.1 * size.width).round(),
            (self.y.1 * size.height).round(),
        )
    }
}

/// Vertical zoom slider on the left edge of the board viewport.
pub const ZOOM_BAR: RelativeRect = RelativeRect::new((0.01, 0.06), (0.05, 0.40));

/// Strip along the bottom of the board viewport that pans when dragged.
pub const PAN_STRIP: RelativeRect = RelativeRect::new((0.10, 0.90), (0.96, 1.0));

pub const TOOL_BOX: RelativeRect = RelativeRect::new((0.05, 0.95), (0.02, 0.30));

pub const COLOR_BOX: RelativeRect = RelativeRect::new((0.05, 0.95), (0.32, 0.55));

pub const THICKNESS_BAR: RelativeRect = RelativeRect::new((0.05, 0.95), (0.57, 0.67));

pub const UNDO_BUTTON: RelativeRect = RelativeRect::new((0.05, 0.475), (0.70, 0.76));

pub const CLEAR_BUTTON: RelativeRect = RelativeRect::new((0.525, 0.95), (0.70, 0.76));

pub const SNAP_TOGGLE: RelativeRect = RelativeRect::new((0.05, 0.95), (0.78, 0.84));

/// Free area below the toolbar where the overview first shows the board
/// viewport's region.
pub const OVERVIEW_BOX: RelativeRect = RelativeRect::new((0.05, 0.95), (0.86, 0.98));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixels_scales_and_rounds() {
        let rect = RelativeRect::new((0.1, 0.5), (0.25, 1.0)).to_pixels(Size::new(240.0, 640.0));
        assert_eq!(rect, Rect::new(24.0, 160.0, 120.0, 640.0));
    }

    #[test]
    fn test_toolbar_boxes_do_not_overlap() {
        let size = Size::new(240.0, 640.0);
        let boxes = [
            TOOL_BOX,
            COLOR_BOX,
            THICKNESS_BAR,
            UNDO_BUTTON,
            CLEAR_BUTTON,
            SNAP_TOGGLE,
            OVERVIEW_BOX,
        ]
        .map(|r| r.to_pixels(size));
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                assert!(a.intersect(*b).area() <= 0.0, "{a:?} overlaps {b:?}");
            }
        }
    }
}
