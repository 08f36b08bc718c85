//! Interactive widgets for Slateboard viewports.
//!
//! Every widget implements [`slateboard_core::Control`] and is registered
//! with a viewport's router:
//!
//! - **Buttons**: toggle, momentary and cycling buttons with typed observers
//! - **Groups**: grid-laid button groups, optionally exclusive (radio)
//! - **Slider**: value picker over evenly spaced stops
//! - **PanArea**: drag anywhere inside (or, inside-out, outside) to pan
//!   the viewport
//! - **ZoomBox**: the board's focus region outlined in an overview, which
//!   pans or resizes the focus when dragged

pub mod buttons;
pub mod group;
pub mod pan_area;
pub mod slider;
pub mod zoom_box;

pub use buttons::{Activation, Button, ButtonKind, ButtonObserver};
pub use group::{ButtonGroup, GroupObserver};
pub use pan_area::PanArea;
pub use slider::{Orientation, Slider, SliderObserver};
pub use zoom_box::ZoomBox;

/// Standard sizing constants used across widgets, in pixels.
pub mod sizing {
    /// Label glyph height
    pub const LABEL_SCALE: f64 = 14.0;
    /// Gap between a widget's edge and its label
    pub const LABEL_INSET: f64 = 5.0;
    /// Outline width at rest
    pub const BORDER: u32 = 1;
    /// Extra outline width while hovered
    pub const HOVER_EXTRA: u32 = 2;
    /// Extra outline width while pressed
    pub const PRESSED_EXTRA: u32 = 5;
    /// Inset of a color swatch inside its button
    pub const SWATCH_INSET: f64 = 6.0;
    /// Slider track end margin
    pub const TRACK_MARGIN: f64 = 12.0;
    /// Slider track width
    pub const TRACK_WIDTH: u32 = 2;
    /// Slider tab size along and across the track
    pub const TAB_LENGTH: f64 = 10.0;
    pub const TAB_BREADTH: f64 = 18.0;
    /// Side of a zoom box's resize handle
    pub const HANDLE: f64 = 10.0;
    /// Smallest zoom box side
    pub const MIN_BOX: f64 = 8.0;
}

/// Standard colors used across widgets.
pub mod theme {
    use slateboard_core::SerializableColor;

    /// Outline and label color
    pub const TEXT: SerializableColor = SerializableColor::rgb(64, 64, 64);
    /// Border of inactive areas
    pub const BORDER: SerializableColor = SerializableColor::rgb(192, 192, 192);
    /// Selection/active color (blue)
    pub const ACCENT: SerializableColor = SerializableColor::rgb(59, 130, 246);
}
