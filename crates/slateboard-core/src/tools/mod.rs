//! Tool system for the board.
//!
//! Each tool is a small struct implementing [`Tool`]; the [`ToolManager`]
//! owns one of each and forwards gestures to whichever is active. Shared
//! behaviour lives in the free helpers [`snapped`] and [`style_for`].

mod pan;
mod select;
mod shape;
mod text;

pub use pan::PanTool;
pub use select::SelectTool;
pub use shape::ShapeTool;
pub use text::TextTool;

use crate::input::{Key, MouseResult, PointerKind};
use crate::snap::{GRID_SIZE, snap_to_grid};
use crate::store::VectorStore;
use crate::surface::Surface;
use crate::vectors::{SerializableColor, VectorKind, VectorStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pencil,
    Line,
    Rectangle,
    Circle,
    Text,
    Pan,
    Select,
}

impl ToolKind {
    /// The vector kind this tool draws, if it draws one.
    pub fn vector_kind(self) -> Option<VectorKind> {
        match self {
            ToolKind::Pencil => Some(VectorKind::Pencil),
            ToolKind::Line => Some(VectorKind::Line),
            ToolKind::Rectangle => Some(VectorKind::Rectangle),
            ToolKind::Circle => Some(VectorKind::Circle),
            ToolKind::Text => Some(VectorKind::Text),
            ToolKind::Pan | ToolKind::Select => None,
        }
    }

    /// Short label for toolbar buttons.
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Pencil => "pencil",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rect",
            ToolKind::Circle => "circle",
            ToolKind::Text => "text",
            ToolKind::Pan => "pan",
            ToolKind::Select => "select",
        }
    }
}

/// Drawing settings shared by every tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub color: SerializableColor,
    pub thickness: u32,
    /// Font size in board units.
    pub font_size: f64,
    pub snap_to_grid: bool,
    pub grid_size: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            thickness: 2,
            font_size: 20.0,
            snap_to_grid: false,
            grid_size: GRID_SIZE,
        }
    }
}

/// A pointer position in both coordinate systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolPoint {
    pub board: Point,
    pub pixel: Point,
}

/// What a tool may touch while handling an event.
pub struct ToolContext<'a> {
    /// The viewport the gesture happens in.
    pub surface: &'a mut Surface,
    pub store: &'a mut VectorStore,
    pub settings: &'a ToolSettings,
}

/// Shared gesture interface of every tool.
pub trait Tool {
    fn on_gesture_start(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult;

    fn on_gesture_move(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult;

    fn on_gesture_end(&mut self, at: ToolPoint, cx: &mut ToolContext<'_>) -> MouseResult;

    /// Handle a key press. Returns whether the key was used.
    fn on_key(&mut self, _key: Key, _cx: &mut ToolContext<'_>) -> bool {
        false
    }

    /// Called when another tool becomes active.
    fn deactivate(&mut self, _store: &mut VectorStore) {}
}

/// Apply grid snapping when it is enabled.
pub fn snapped(point: Point, settings: &ToolSettings) -> Point {
    if settings.snap_to_grid {
        snap_to_grid(point, settings.grid_size)
    } else {
        point
    }
}

/// Style for a new vector drawn with the current settings.
pub fn style_for(settings: &ToolSettings) -> VectorStyle {
    VectorStyle::new(settings.color, settings.thickness)
}

/// Manages the current tool and the shared settings.
#[derive(Debug)]
pub struct ToolManager {
    current: ToolKind,
    settings: ToolSettings,
    shape: ShapeTool,
    text: TextTool,
    pan: PanTool,
    select: SelectTool,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(ToolKind::default(), ToolSettings::default())
    }
}

impl ToolManager {
    pub fn new(current: ToolKind, settings: ToolSettings) -> Self {
        Self {
            current,
            settings,
            shape: ShapeTool::new(current.vector_kind().unwrap_or(VectorKind::Pencil)),
            text: TextTool::default(),
            pan: PanTool::default(),
            select: SelectTool::default(),
        }
    }

    /// Currently selected tool.
    pub fn current(&self) -> ToolKind {
        self.current
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Switch tools, letting the old one wrap up its pending work.
    pub fn set_tool(&mut self, tool: ToolKind, store: &mut VectorStore) {
        if tool == self.current {
            return;
        }
        self.active_mut().deactivate(store);
        log::info!("Switched tool {:?} -> {:?}", self.current, tool);
        self.current = tool;
        if let Some(kind) = tool.vector_kind().filter(|k| *k != VectorKind::Text) {
            self.shape = ShapeTool::new(kind);
        }
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.settings.color = color;
    }

    pub fn set_thickness(&mut self, thickness: u32) {
        self.settings.thickness = thickness;
    }

    pub fn set_font_size(&mut self, font_size: f64) {
        self.settings.font_size = font_size;
    }

    pub fn set_grid_snap(&mut self, enabled: bool) {
        self.settings.snap_to_grid = enabled;
    }

    /// Marquee being dragged by the select tool, in board space.
    pub fn marquee(&self) -> Option<Rect> {
        match self.current {
            ToolKind::Select => self.select.marquee(),
            _ => None,
        }
    }

    fn active_mut(&mut self) -> &mut dyn Tool {
        match self.current {
            ToolKind::Pencil | ToolKind::Line | ToolKind::Rectangle | ToolKind::Circle => {
                &mut self.shape
            }
            ToolKind::Text => &mut self.text,
            ToolKind::Pan => &mut self.pan,
            ToolKind::Select => &mut self.select,
        }
    }

    /// Forward a pointer event to the active tool.
    pub fn pointer(
        &mut self,
        kind: PointerKind,
        at: ToolPoint,
        surface: &mut Surface,
        store: &mut VectorStore,
    ) -> MouseResult {
        let settings = self.settings;
        let mut cx = ToolContext {
            surface,
            store,
            settings: &settings,
        };
        let tool = self.active_mut();
        match kind {
            PointerKind::Down => tool.on_gesture_start(at, &mut cx),
            PointerKind::Move => tool.on_gesture_move(at, &mut cx),
            PointerKind::Up => tool.on_gesture_end(at, &mut cx),
        }
    }

    /// Forward a key press to the active tool.
    pub fn key(&mut self, key: Key, surface: &mut Surface, store: &mut VectorStore) -> bool {
        let settings = self.settings;
        let mut cx = ToolContext {
            surface,
            store,
            settings: &settings,
        };
        self.active_mut().on_key(key, &mut cx)
    }
}
