//! Shared numeric constants for the grid engine.

// ── View ────────────────────────────────────────────────────────

/// Default grid line spacing in true-space units.
pub const DEFAULT_CELL_SIZE: f64 = 40.0;

// ── Chrome buttons ──────────────────────────────────────────────

/// Zoom factor applied per zoom-in button press.
pub const BUTTON_ZOOM_IN: f64 = 1.05;

/// Zoom factor applied per zoom-out button press.
pub const BUTTON_ZOOM_OUT: f64 = 0.95;

/// Pan distance in true-space units per pan button press.
pub const BUTTON_PAN_STEP: f64 = 10.0;

// ── Drawing ─────────────────────────────────────────────────────

/// Grid line stroke color.
pub const GRID_STROKE_STYLE: &str = "rgb(229,231,235)";

/// Grid line width in pixels.
pub const GRID_LINE_WIDTH: f64 = 1.0;

/// Coordinate label font.
pub const LABEL_FONT: &str = "10px serif";
