//! Frame assembly: everything one viewport shows, in drawing order.

use crate::renderer::{GridStyle, RenderContext, RenderResult, Renderer};
use kurbo::{Point, Rect};
use slateboard_core::snap::grid_lines;
use slateboard_core::{DrawCommand, FixedPoint, InteractionRouter, VectorStore, View};

/// Grid spacing below which the grid is skipped, in pixels.
const MIN_GRID_SPACING_PX: f64 = 4.0;

/// Side of a grid dot, in pixels.
const GRID_DOT_PX: f64 = 2.0;

/// Render one viewport: background, grid, vectors, selection boxes,
/// marquee, then controls on top.
pub fn render_frame(
    ctx: &RenderContext,
    view: &View,
    store: &mut VectorStore,
    controls: &InteractionRouter,
    renderer: &mut impl Renderer,
) -> RenderResult<()> {
    renderer.begin_frame(view.size(), ctx.background_color)?;

    draw_grid(ctx, view, renderer);

    let mut commands = Vec::new();
    store.display(view, &mut commands);
    for command in &commands {
        renderer.draw(command);
    }

    for selected in store.selected() {
        let (p1, p2) = pixel_corners(view, selected.bounds());
        renderer.draw_rect(p1, p2, ctx.selection_color, 1);
    }
    if let Some(marquee) = ctx.selection_rect {
        let (p1, p2) = pixel_corners(view, marquee);
        renderer.draw_rect(p1, p2, ctx.selection_color, 1);
    }

    commands.clear();
    controls.display(&mut commands);
    for command in &commands {
        renderer.draw(command);
    }

    renderer.end_frame()
}

fn pixel_corners(view: &View, rect: Rect) -> (FixedPoint, FixedPoint) {
    (
        view.board_to_pixel(Point::new(rect.x0, rect.y0)),
        view.board_to_pixel(Point::new(rect.x1, rect.y1)),
    )
}

fn draw_grid(ctx: &RenderContext, view: &View, renderer: &mut impl Renderer) {
    if ctx.grid_style == GridStyle::None || ctx.grid_size * view.zoom() < MIN_GRID_SPACING_PX {
        return;
    }
    let area = view.board_bbox();
    let xs: Vec<f64> = grid_lines(area.x0, area.x1, ctx.grid_size).collect();
    let ys: Vec<f64> = grid_lines(area.y0, area.y1, ctx.grid_size).collect();

    match ctx.grid_style {
        GridStyle::None => {}
        GridStyle::Lines => {
            for &x in &xs {
                let line = [
                    view.board_to_pixel(Point::new(x, area.y0)),
                    view.board_to_pixel(Point::new(x, area.y1)),
                ];
                renderer.draw_polyline(&line, false, ctx.grid_color, 1);
            }
            for &y in &ys {
                let line = [
                    view.board_to_pixel(Point::new(area.x0, y)),
                    view.board_to_pixel(Point::new(area.x1, y)),
                ];
                renderer.draw_polyline(&line, false, ctx.grid_color, 1);
            }
        }
        GridStyle::Dots => {
            let half = GRID_DOT_PX / 2.0;
            for &x in &xs {
                for &y in &ys {
                    let c = view.board_to_pixel_f(Point::new(x, y));
                    let dot = DrawCommand::filled_pixel_rect(
                        Rect::new(c.x - half, c.y - half, c.x + half, c.y + half),
                        ctx.grid_color.into(),
                    );
                    renderer.draw(&dot);
                }
            }
        }
    }
}
