//! Immutable startup configuration.
//!
//! A [`BoardConfig`] is built once (from defaults or a JSON file loaded by
//! the host) and handed to constructors. Nothing in the core reads global
//! layout state.

use crate::snap::GRID_SIZE;
use crate::tools::{ToolKind, ToolSettings};
use crate::vectors::SerializableColor;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown color name: {0}")]
    UnknownColor(String),
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// A palette entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub color: SerializableColor,
}

impl NamedColor {
    fn new(name: &str, r: u8, g: u8, b: u8) -> Self {
        Self {
            name: name.to_string(),
            color: SerializableColor::rgb(r, g, b),
        }
    }
}

fn default_palette() -> Vec<NamedColor> {
    vec![
        NamedColor::new("black", 0, 0, 0),
        NamedColor::new("white", 255, 255, 255),
        NamedColor::new("red", 255, 0, 0),
        NamedColor::new("green", 0, 255, 0),
        NamedColor::new("neon green", 57, 255, 20),
        NamedColor::new("blue", 0, 0, 255),
        NamedColor::new("yellow", 255, 255, 0),
        NamedColor::new("cyan", 0, 255, 255),
        NamedColor::new("magenta", 255, 0, 255),
        NamedColor::new("gray", 128, 128, 128),
        NamedColor::new("dark_gray", 64, 64, 64),
        NamedColor::new("light_gray", 192, 192, 192),
        NamedColor::new("off_white", 245, 245, 240),
        NamedColor::new("orange", 255, 165, 0),
        NamedColor::new("purple", 128, 0, 128),
        NamedColor::new("brown", 165, 42, 42),
        NamedColor::new("pink", 255, 192, 203),
        NamedColor::new("olive", 128, 128, 0),
        NamedColor::new("teal", 0, 128, 128),
        NamedColor::new("navy", 0, 0, 128),
    ]
}

fn names(rows: &[[&str; 2]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

/// Layout, palette and tool defaults for a whiteboard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Pixel size of the drawing viewport.
    pub board_size: Size,
    /// Pixel size of the toolbar viewport.
    pub controls_size: Size,
    pub palette: Vec<NamedColor>,
    /// Color buttons, row by row, by palette name.
    pub color_grid: Vec<Vec<String>>,
    /// Tool buttons, row by row. Short rows leave gaps.
    pub tool_grid: Vec<Vec<ToolKind>>,
    pub default_tool: ToolKind,
    pub default_color: String,
    /// Stops of the thickness slider, in pixels.
    pub thicknesses: Vec<u32>,
    pub default_thickness: u32,
    /// Font size of new labels, in board units.
    pub font_size: f64,
    /// Stops of the zoom slider; the slider interpolates between them.
    pub zoom_levels: Vec<f64>,
    pub initial_zoom: f64,
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub show_grid: bool,
    pub background: String,
    pub grid_color: String,
    pub selection_color: String,
    pub control_color: String,
    /// Extra padding used when fitting a view to the board's content.
    pub fit_margin: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_size: Size::new(1200.0, 800.0),
            controls_size: Size::new(240.0, 640.0),
            palette: default_palette(),
            color_grid: names(&[
                ["black", "white"],
                ["red", "orange"],
                ["blue", "yellow"],
                ["purple", "green"],
            ]),
            tool_grid: vec![
                vec![ToolKind::Pencil, ToolKind::Line],
                vec![ToolKind::Rectangle, ToolKind::Circle],
                vec![ToolKind::Text, ToolKind::Select],
                vec![ToolKind::Pan],
            ],
            default_tool: ToolKind::Pencil,
            default_color: "black".to_string(),
            thicknesses: vec![1, 2, 3, 5, 8, 13],
            default_thickness: 2,
            font_size: 20.0,
            zoom_levels: vec![0.25, 0.5, 1.0, 2.0, 4.0, 8.0],
            initial_zoom: 1.0,
            grid_size: GRID_SIZE,
            snap_to_grid: false,
            show_grid: true,
            background: "off_white".to_string(),
            grid_color: "light_gray".to_string(),
            selection_color: "cyan".to_string(),
            control_color: "dark_gray".to_string(),
            fit_margin: crate::view::DEFAULT_FIT_MARGIN,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Look up a palette color by name.
    pub fn color(&self, name: &str) -> Result<SerializableColor, ConfigError> {
        self.palette
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.color)
            .ok_or_else(|| ConfigError::UnknownColor(name.to_string()))
    }

    /// Initial settings for the tool manager.
    pub fn tool_settings(&self) -> ToolSettings {
        ToolSettings {
            color: self
                .color(&self.default_color)
                .unwrap_or(SerializableColor::black()),
            thickness: self.default_thickness,
            font_size: self.font_size,
            snap_to_grid: self.snap_to_grid,
            grid_size: self.grid_size,
        }
    }

    /// Check every cross-reference and range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let referenced = [
            &self.default_color,
            &self.background,
            &self.grid_color,
            &self.selection_color,
            &self.control_color,
        ];
        for name in referenced.into_iter().chain(self.color_grid.iter().flatten()) {
            self.color(name)?;
        }

        for (what, size) in [("board_size", self.board_size), ("controls_size", self.controls_size)] {
            if !(size.width > 0.0 && size.height > 0.0) {
                return Err(ConfigError::InvalidValue(format!("{what} must be positive")));
            }
        }
        if self.thicknesses.is_empty() {
            return Err(ConfigError::InvalidValue("thicknesses is empty".into()));
        }
        if self.zoom_levels.is_empty()
            || self.zoom_levels.iter().any(|z| !(*z > 0.0 && z.is_finite()))
        {
            return Err(ConfigError::InvalidValue(
                "zoom_levels must be non-empty and positive".into(),
            ));
        }
        if !(self.initial_zoom > 0.0 && self.initial_zoom.is_finite()) {
            return Err(ConfigError::InvalidValue("initial_zoom must be positive".into()));
        }
        if !(self.font_size > 0.0) {
            return Err(ConfigError::InvalidValue("font_size must be positive".into()));
        }
        if !(self.grid_size > 0.0 && self.grid_size.is_finite()) {
            return Err(ConfigError::InvalidValue("grid_size must be positive".into()));
        }
        if !(self.fit_margin >= 0.0 && self.fit_margin.is_finite()) {
            return Err(ConfigError::InvalidValue(
                "fit_margin must be zero or positive".into(),
            ));
        }
        if !self.tool_grid.iter().flatten().any(|t| *t == self.default_tool) {
            return Err(ConfigError::InvalidValue(format!(
                "default_tool {:?} has no button",
                self.default_tool
            )));
        }
        Ok(())
    }
}
