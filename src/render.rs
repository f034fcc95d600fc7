//! Grid rendering: line layout and canvas drawing.
//!
//! Layout is pure — [`layout`] computes the visible grid lines and their
//! coordinate labels from camera state, cell size, and viewport dimensions,
//! so it can be tested without a browser. [`draw`] is the only place that
//! touches [`web_sys::CanvasRenderingContext2d`]; it receives read-only views
//! of engine state and produces pixels.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::Camera;
use crate::consts::{GRID_LINE_WIDTH, GRID_STROKE_STYLE, LABEL_FONT};

/// A single grid line in screen space, with its coordinate label.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    /// Screen-space position along the line's axis (x for vertical lines,
    /// y for horizontal ones).
    pub screen_pos: f64,
    /// Coordinate label drawn at the line's origin end.
    pub label: String,
}

/// The full set of visible grid lines for one redraw.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLayout {
    pub vertical: Vec<GridLine>,
    pub horizontal: Vec<GridLine>,
}

/// Compute the visible grid lines for the given camera and viewport.
#[must_use]
pub fn layout(camera: &Camera, cell_size: f64, viewport_w: f64, viewport_h: f64) -> GridLayout {
    GridLayout {
        vertical: axis_lines(camera.offset_x, camera.scale, cell_size, viewport_w),
        horizontal: axis_lines(camera.offset_y, camera.scale, cell_size, viewport_h),
    }
}

/// Grid lines along one axis, from the first visible line to the viewport edge.
///
/// The first line sits at the non-negative remainder of the offset within one
/// cell, scaled to screen space. A sign-following remainder would let negative
/// offsets push the first line off-screen.
fn axis_lines(offset: f64, scale: f64, cell_size: f64, extent: f64) -> Vec<GridLine> {
    let step = cell_size * scale;
    if step <= 0.0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut pos = offset.rem_euclid(cell_size) * scale;
    while pos <= extent {
        lines.push(GridLine { screen_pos: pos, label: format!("{pos:.0}") });
        pos += step;
    }
    lines
}

/// Draw the grid: resize the backing store, clear, stroke all lines as one
/// batched path, then fill every label.
///
/// `viewport_w` and `viewport_h` are in CSS pixels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    camera: &Camera,
    cell_size: f64,
    viewport_w: f64,
    viewport_h: f64,
) -> Result<(), JsValue> {
    canvas.set_width(px(viewport_w));
    canvas.set_height(px(viewport_h));
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);

    let grid = layout(camera, cell_size, viewport_w, viewport_h);

    ctx.set_stroke_style_str(GRID_STROKE_STYLE);
    ctx.set_line_width(GRID_LINE_WIDTH);
    ctx.set_font(LABEL_FONT);
    ctx.set_text_baseline("top");

    ctx.begin_path();
    for line in &grid.vertical {
        ctx.move_to(line.screen_pos, 0.0);
        ctx.line_to(line.screen_pos, viewport_h);
    }
    for line in &grid.horizontal {
        ctx.move_to(0.0, line.screen_pos);
        ctx.line_to(viewport_w, line.screen_pos);
    }
    ctx.stroke();

    for line in &grid.vertical {
        ctx.fill_text(&line.label, line.screen_pos, 0.0)?;
    }
    for line in &grid.horizontal {
        ctx.fill_text(&line.label, 0.0, line.screen_pos)?;
    }

    Ok(())
}

/// Clamp a CSS-pixel dimension to the canvas backing-store integer range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn px(dimension: f64) -> u32 {
    dimension.max(0.0) as u32
}
