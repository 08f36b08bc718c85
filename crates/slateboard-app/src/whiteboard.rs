//! The host-facing whiteboard: one shared board seen through two viewports.
//!
//! The **board** viewport is where drawing happens; it carries a zoom slider
//! and a pan strip. The **controls** viewport holds the toolbar (tools,
//! colors, thickness, undo, clear, grid snap) over a zoomed-out overview of
//! the same board. Both route input through their own [`InteractionRouter`]
//! into the shared [`Board`].
//!
//! The two viewports are linked through [`Board::focus`]: it always equals
//! the board viewport's visible region, and the overview outlines it with a
//! [`ZoomBox`]. Panning or zooming the board viewport moves the outline;
//! dragging the outline in the overview pans or zooms the board viewport.

use crate::layout;
use kurbo::{Point, Rect, Size};
use peniko::Color;
use slateboard_core::{
    Board, BoardConfig, ConfigError, ControlContext, DocumentError, InteractionRouter, Key,
    PointerEvent, Routed, SerializableColor, Storage, StorageError, Surface, ToolKind, View,
};
use slateboard_render::{GridStyle, RenderContext, RendererError, Renderer, render_frame};
use slateboard_widgets::{
    Button, ButtonGroup, ButtonObserver, GroupObserver, Orientation, PanArea, Slider,
    SliderObserver, ZoomBox,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WhiteboardError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type WhiteboardResult<T> = Result<T, WhiteboardError>;

/// Which viewport an event or frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportId {
    Board,
    Controls,
}

impl ViewportId {
    pub fn name(self) -> &'static str {
        match self {
            ViewportId::Board => "board",
            ViewportId::Controls => "controls",
        }
    }
}

/// One window onto the board: its view plus the controls placed on it.
#[derive(Debug)]
pub struct Viewport {
    surface: Surface,
    router: InteractionRouter,
    grid: GridStyle,
}

impl Viewport {
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn router(&self) -> &InteractionRouter {
        &self.router
    }

    pub fn grid(&self) -> GridStyle {
        self.grid
    }
}

/// Palette entries resolved once at startup.
#[derive(Debug, Clone, Copy)]
struct Colors {
    background: Color,
    grid: Color,
    selection: Color,
    control: SerializableColor,
}

impl Colors {
    fn resolve(config: &BoardConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            background: config.color(&config.background)?.into(),
            grid: config.color(&config.grid_color)?.into(),
            selection: config.color(&config.selection_color)?.into(),
            control: config.color(&config.control_color)?,
        })
    }
}

/// Switches the active tool when the tool group's selection changes.
struct ToolSelector {
    tools: Vec<ToolKind>,
}

impl GroupObserver for ToolSelector {
    fn on_selection_changed(&mut self, _old: usize, new: usize, cx: &mut ControlContext<'_>) {
        if let Some(tool) = self.tools.get(new) {
            cx.board.set_tool(*tool);
        }
    }
}

/// Sets the drawing color from the color group.
struct ColorSelector {
    colors: Vec<SerializableColor>,
}

impl GroupObserver for ColorSelector {
    fn on_selection_changed(&mut self, _old: usize, new: usize, cx: &mut ControlContext<'_>) {
        if let Some(color) = self.colors.get(new) {
            cx.board.tools.set_color(*color);
        }
    }
}

struct ThicknessSetter;

impl SliderObserver for ThicknessSetter {
    fn on_value_changed(&mut self, _old: f64, new: f64, cx: &mut ControlContext<'_>) {
        cx.board.tools.set_thickness(new.round() as u32);
    }
}

/// Zooms the owning viewport around its center.
struct ZoomSetter;

impl SliderObserver for ZoomSetter {
    fn on_value_changed(&mut self, _old: f64, new: f64, cx: &mut ControlContext<'_>) {
        let size = cx.surface.size();
        let center = Point::new(size.width / 2.0, size.height / 2.0);
        cx.surface.zoom_to(new, center);
    }
}

struct UndoAction;

impl ButtonObserver for UndoAction {
    fn on_state_changed(&mut self, _old: u32, new: u32, cx: &mut ControlContext<'_>) {
        if new == 1 {
            cx.board.store.undo_delete();
        }
    }
}

struct ClearAction;

impl ButtonObserver for ClearAction {
    fn on_state_changed(&mut self, _old: u32, new: u32, cx: &mut ControlContext<'_>) {
        if new == 1 {
            cx.board.store.clear();
        }
    }
}

struct GridSnapSetter;

impl ButtonObserver for GridSnapSetter {
    fn on_state_changed(&mut self, _old: u32, new: u32, cx: &mut ControlContext<'_>) {
        cx.board.tools.set_grid_snap(new == 1);
    }
}

/// A whiteboard session.
#[derive(Debug)]
pub struct Whiteboard {
    config: BoardConfig,
    colors: Colors,
    board: Board,
    board_viewport: Viewport,
    controls_viewport: Viewport,
}

impl Whiteboard {
    /// Build the board and both viewports from `config`.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let colors = Colors::resolve(&config)?;
        let board = Board::from_config(&config);

        let board_viewport = Viewport {
            surface: Surface::new(
                ViewportId::Board.name(),
                View::new(Point::ZERO, config.initial_zoom, config.board_size),
            ),
            router: board_controls(&config, colors)?,
            grid: if config.show_grid {
                GridStyle::Lines
            } else {
                GridStyle::None
            },
        };
        let overview = overview(board_viewport.surface.view(), config.controls_size);
        let controls_viewport = Viewport {
            surface: Surface::new(ViewportId::Controls.name(), overview),
            router: toolbar(&config, colors)?,
            grid: GridStyle::None,
        };
        log::info!(
            "Created whiteboard with {}x{} board viewport",
            config.board_size.width,
            config.board_size.height
        );

        let mut whiteboard = Self {
            config,
            colors,
            board,
            board_viewport,
            controls_viewport,
        };
        whiteboard.track_board_view();
        Ok(whiteboard)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn viewport(&self, id: ViewportId) -> &Viewport {
        match id {
            ViewportId::Board => &self.board_viewport,
            ViewportId::Controls => &self.controls_viewport,
        }
    }

    fn viewport_mut(&mut self, id: ViewportId) -> &mut Viewport {
        match id {
            ViewportId::Board => &mut self.board_viewport,
            ViewportId::Controls => &mut self.controls_viewport,
        }
    }

    pub fn handle_pointer(&mut self, id: ViewportId, event: PointerEvent) -> Routed {
        let focus = self.board.focus;
        let viewport = match id {
            ViewportId::Board => &mut self.board_viewport,
            ViewportId::Controls => &mut self.controls_viewport,
        };
        let routed = viewport
            .router
            .handle_pointer(event, &mut viewport.surface, &mut self.board);
        if id == ViewportId::Controls && self.board.focus != focus {
            self.show_focus();
        }
        self.track_board_view();
        routed
    }

    pub fn handle_key(&mut self, id: ViewportId, key: Key) -> Routed {
        let viewport = match id {
            ViewportId::Board => &mut self.board_viewport,
            ViewportId::Controls => &mut self.controls_viewport,
        };
        viewport
            .router
            .handle_key(key, &mut viewport.surface, &mut self.board)
    }

    /// The host resized a viewport. Controls keep their pixel positions.
    ///
    /// A zero size (a minimized window) keeps the current view.
    pub fn resize(&mut self, id: ViewportId, size: Size) {
        self.viewport_mut(id).surface.resize(size);
        self.track_board_view();
    }

    /// Point the board viewport at the focus region moved in the overview,
    /// keeping its top-left corner and filling the viewport along one axis.
    fn show_focus(&mut self) {
        let Some(focus) = self.board.focus else {
            return;
        };
        let surface = &mut self.board_viewport.surface;
        let size = surface.size();
        let zoom = (size.width / focus.width()).min(size.height / focus.height());
        if !(zoom > 0.0 && zoom.is_finite()) {
            log::warn!("Ignoring degenerate focus {focus:?}");
            return;
        }
        surface.set_view(View::new(Point::new(focus.x0, focus.y0), zoom, size));
    }

    /// Make the focus match the board viewport and let every control
    /// catch up with the current views.
    fn track_board_view(&mut self) {
        self.board.focus = Some(self.board_viewport.surface.view().board_bbox());
        for viewport in [&mut self.board_viewport, &mut self.controls_viewport] {
            viewport.router.sync(viewport.surface.view(), &self.board);
        }
    }

    /// Frame settings for a viewport.
    pub fn render_context(&self, id: ViewportId) -> RenderContext {
        RenderContext::new()
            .with_background(self.colors.background)
            .with_grid(self.viewport(id).grid)
            .with_grid_size(self.config.grid_size)
            .with_grid_color(self.colors.grid)
            .with_selection_color(self.colors.selection)
            .with_selection_rect(self.board.tools.marquee())
    }

    pub fn render(&mut self, id: ViewportId, renderer: &mut impl Renderer) -> WhiteboardResult<()> {
        let ctx = self.render_context(id);
        let viewport = match id {
            ViewportId::Board => &self.board_viewport,
            ViewportId::Controls => &self.controls_viewport,
        };
        render_frame(
            &ctx,
            viewport.surface.view(),
            &mut self.board.store,
            &viewport.router,
            renderer,
        )?;
        Ok(())
    }

    pub fn undo_delete(&mut self) -> bool {
        self.board.store.undo_delete().is_some()
    }

    /// Save the committed and deleted vectors under `id`.
    pub fn save(&self, storage: &dyn Storage, id: &str) -> WhiteboardResult<()> {
        let document = self.board.store.to_document()?;
        storage.save(id, &document)?;
        log::info!("Saved board {id} ({} vectors)", self.board.store.len());
        Ok(())
    }

    /// Replace the board's vectors with the ones saved under `id`.
    ///
    /// On error the board is left untouched.
    pub fn load(&mut self, storage: &dyn Storage, id: &str) -> WhiteboardResult<()> {
        let document = storage.load(id)?;
        self.board.store.load_document(&document)?;
        Ok(())
    }

    /// Replace the board's vectors from a saved JSON document.
    pub fn load_json(&mut self, json: &str) -> WhiteboardResult<()> {
        self.board.store.load_json(json)?;
        Ok(())
    }

    /// Point a viewport at everything on the board.
    ///
    /// Returns false, leaving the view alone, when the board is empty.
    pub fn fit_to_content(&mut self, id: ViewportId, margin: f64) -> bool {
        let Some(bounds) = self.board.store.bounds() else {
            return false;
        };
        let corners = [Point::new(bounds.x0, bounds.y0), Point::new(bounds.x1, bounds.y1)];
        let surface = &mut self.viewport_mut(id).surface;
        let Some(view) = View::fitting(&corners, surface.size(), margin) else {
            return false;
        };
        log::debug!("Fitted {} viewport to {bounds:?}", id.name());
        surface.set_view(view);
        self.track_board_view();
        true
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::InvalidValue(reason)
}

/// Overview for a controls viewport of `size`: zoomed out so that `shown`
/// sits inside the free area below the toolbar.
fn overview(shown: &View, size: Size) -> View {
    let target = layout::OVERVIEW_BOX.to_pixels(size);
    let region = shown.board_bbox();
    let zoom = (target.width() / region.width()).min(target.height() / region.height());
    if !(zoom > 0.0 && zoom.is_finite()) {
        return View::new(Point::ZERO, 1.0, size);
    }
    View::new(region.center() - target.center().to_vec2() / zoom, zoom, size)
}

/// Zoom slider and pan strip of the board viewport.
fn board_controls(config: &BoardConfig, colors: Colors) -> Result<InteractionRouter, ConfigError> {
    let size = config.board_size;
    let mut zoom = Slider::new(
        "zoom",
        layout::ZOOM_BAR.to_pixels(size),
        Orientation::Vertical,
        config.zoom_levels.clone(),
        true,
        0.0,
    )
    .with_color(colors.control)
    .with_observer(ZoomSetter)
    .tracking(|view: &View| view.zoom());
    let position = zoom.position_for(config.initial_zoom).ok_or_else(|| {
        invalid(format!("initial_zoom {} is outside zoom_levels", config.initial_zoom))
    })?;
    zoom.set_position(position);

    let mut router = InteractionRouter::new();
    router.add_control(Box::new(zoom));
    router.add_control(Box::new(PanArea::new("pan", layout::PAN_STRIP.to_pixels(size))));
    Ok(router)
}

/// Tool and color radio groups, thickness slider and action buttons.
fn toolbar(config: &BoardConfig, colors: Colors) -> Result<InteractionRouter, ConfigError> {
    let size = config.controls_size;
    let mut router = InteractionRouter::new();
    // Inside-out, so it goes first and every other control wins over it.
    router.add_control(Box::new(ZoomBox::new("zoom box")));

    let tools: Vec<ToolKind> = config.tool_grid.iter().flatten().copied().collect();
    let initial_tool = tools
        .iter()
        .position(|t| *t == config.default_tool)
        .ok_or_else(|| invalid(format!("default_tool {:?} has no button", config.default_tool)))?;
    let tool_grid = config
        .tool_grid
        .iter()
        .map(|row| {
            row.iter()
                .map(|tool| Some(Button::toggle(tool.label(), Rect::ZERO).with_color(colors.control)))
                .collect()
        })
        .collect();
    let tool_group = ButtonGroup::new("tools", layout::TOOL_BOX.to_pixels(size), tool_grid)
        .exclusive(initial_tool)
        .with_observer(ToolSelector { tools });
    router.add_control(Box::new(tool_group));

    let names: Vec<&String> = config.color_grid.iter().flatten().collect();
    let initial_color = names
        .iter()
        .position(|name| **name == config.default_color)
        .ok_or_else(|| invalid(format!("default_color {} has no button", config.default_color)))?;
    let palette = names
        .iter()
        .map(|name| config.color(name))
        .collect::<Result<Vec<_>, _>>()?;
    let color_grid = config
        .color_grid
        .iter()
        .map(|row| {
            row.iter()
                .map(|name| {
                    let swatch = config.color(name)?;
                    Ok(Some(
                        Button::toggle(name.as_str(), Rect::ZERO)
                            .with_color(colors.control)
                            .with_swatch(swatch),
                    ))
                })
                .collect::<Result<Vec<_>, ConfigError>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    let color_group = ButtonGroup::new("colors", layout::COLOR_BOX.to_pixels(size), color_grid)
        .exclusive(initial_color)
        .with_observer(ColorSelector { colors: palette });
    router.add_control(Box::new(color_group));

    let stops: Vec<f64> = config.thicknesses.iter().map(|t| f64::from(*t)).collect();
    let mut thickness = Slider::new(
        "thickness",
        layout::THICKNESS_BAR.to_pixels(size),
        Orientation::Horizontal,
        stops,
        false,
        0.0,
    )
    .with_color(colors.control)
    .with_observer(ThicknessSetter);
    let position = thickness
        .position_for(f64::from(config.default_thickness))
        .ok_or_else(|| {
            invalid(format!(
                "default_thickness {} is not one of {:?}",
                config.default_thickness, config.thicknesses
            ))
        })?;
    thickness.set_position(position);
    router.add_control(Box::new(thickness));

    router.add_control(Box::new(
        Button::momentary("undo", layout::UNDO_BUTTON.to_pixels(size))
            .with_color(colors.control)
            .with_observer(UndoAction),
    ));
    router.add_control(Box::new(
        Button::momentary("clear", layout::CLEAR_BUTTON.to_pixels(size))
            .with_color(colors.control)
            .with_observer(ClearAction),
    ));
    router.add_control(Box::new(
        Button::toggle("snap", layout::SNAP_TOGGLE.to_pixels(size))
            .with_color(colors.control)
            .with_state(u32::from(config.snap_to_grid))
            .with_observer(GridSnapSetter),
    ));

    Ok(router)
}
