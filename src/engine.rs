use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::consts::{BUTTON_ZOOM_IN, BUTTON_ZOOM_OUT, DEFAULT_CELL_SIZE};
use crate::input::{ContactSample, GestureState};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Outcome of an event handler, telling the shell what to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do.
    None,
    /// The view changed; the surface must be redrawn.
    RenderNeeded,
}

/// Engine construction options supplied by the host.
///
/// Parsed from the host's JSON options object; unknown keys are ignored and
/// absent keys take defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Grid line spacing in true-space units.
    pub cell_size: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cell_size: DEFAULT_CELL_SIZE }
    }
}

impl GridConfig {
    /// Parse options from the host's JSON object, e.g. `{"cellSize": 30}`.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error when `json` is not a valid object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser
/// dependencies.
pub struct EngineCore {
    pub camera: Camera,
    pub gesture: GestureState,
    pub config: GridConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            gesture: GestureState::default(),
            config: GridConfig::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self { config, ..Self::default() }
    }

    // --- Viewport ---

    /// Record the current surface dimensions in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// The surface was resized by the host; record and redraw.
    pub fn on_surface_resize(&mut self, width: f64, height: f64) -> Action {
        self.set_viewport(width, height);
        Action::RenderNeeded
    }

    // --- Gesture events ---

    /// A new contact sequence begins (or gains/loses a contact mid-sequence).
    ///
    /// Initializes the session so the current sample is its own predecessor,
    /// then processes the sample as a move; the first delta is therefore zero.
    pub fn on_contact_start(&mut self, contacts: &[Point]) -> Action {
        match ContactSample::from_contacts(contacts) {
            Some(sample) => {
                self.gesture = GestureState::tracking(sample);
                self.on_contact_move(contacts)
            }
            None => {
                self.gesture = GestureState::Idle;
                Action::None
            }
        }
    }

    /// Active contacts moved.
    ///
    /// Single-contact samples never mutate the camera; two-contact samples
    /// apply incremental pan and zoom against the previous sample. The
    /// previous sample is updated unconditionally for every processed sample.
    pub fn on_contact_move(&mut self, contacts: &[Point]) -> Action {
        let Some(sample) = ContactSample::from_contacts(contacts) else {
            self.gesture = GestureState::Idle;
            return Action::None;
        };

        // On a mode change (or a move arriving while idle) the sample acts as
        // its own predecessor, so the transition produces no jump.
        let prev = self.gesture.prev_for(&sample).unwrap_or(sample);

        let action = if sample.is_double() {
            self.pinch_update(sample, prev);
            Action::RenderNeeded
        } else {
            // Single-contact drag is reserved for a future click feature.
            Action::None
        };

        self.gesture = GestureState::tracking(sample);
        action
    }

    /// Contacts lifted; an empty list ends the sequence.
    ///
    /// With contacts remaining, the next sample re-derives the mode.
    pub fn on_contact_end(&mut self, contacts: &[Point]) -> Action {
        if contacts.is_empty() {
            self.gesture = GestureState::Idle;
        }
        Action::None
    }

    /// Apply one two-contact sample: zoom by the contact-separation ratio,
    /// pan by the midpoint movement, and correct the pan so the point under
    /// the midpoint stays visually fixed while zooming.
    fn pinch_update(&mut self, sample: ContactSample, prev: ContactSample) {
        let (Some(second), Some(prev_second)) = (sample.second, prev.second) else {
            return;
        };

        let hypot = sample.first.distance_to(second);
        let prev_hypot = prev.first.distance_to(prev_second);
        // Identical previous positions make the ratio undefined; treat that
        // sample as no zoom.
        let zoom_factor = if prev_hypot > 0.0 { hypot / prev_hypot } else { 1.0 };
        self.camera.apply_zoom(zoom_factor);

        // Signed "how much zoom just happened"; feeds only the anchor
        // correction below.
        let scale_amount = 1.0 - zoom_factor;

        let mid = sample.first.midpoint(second);
        let prev_mid = prev.first.midpoint(prev_second);

        // Midpoint movement in pixels, converted to true-space units at the
        // already-updated scale.
        let pan_x = (mid.x - prev_mid.x) / self.camera.scale;
        let pan_y = (mid.y - prev_mid.y) / self.camera.scale;

        // Fractional position of the midpoint within the surface (0,0 = top
        // left, 1,1 = bottom right; not clamped).
        let zoom_ratio_x = mid.x / self.viewport_width;
        let zoom_ratio_y = mid.y / self.viewport_height;

        let anchor_x = self.camera.true_width(self.viewport_width) * scale_amount * zoom_ratio_x;
        let anchor_y = self.camera.true_height(self.viewport_height) * scale_amount * zoom_ratio_y;

        self.camera.apply_pan(pan_x + anchor_x, pan_y + anchor_y);
    }

    // --- Discrete commands ---

    /// Zoom in by `factor` (must be above 1).
    pub fn zoom_in(&mut self, factor: f64) -> Action {
        self.camera.apply_zoom(factor);
        Action::RenderNeeded
    }

    /// Zoom out by `factor` (must be between 0 and 1).
    pub fn zoom_out(&mut self, factor: f64) -> Action {
        self.camera.apply_zoom(factor);
        Action::RenderNeeded
    }

    /// Pan the view left by `amount` true-space units.
    pub fn pan_left(&mut self, amount: f64) -> Action {
        self.camera.apply_pan(-amount, 0.0);
        Action::RenderNeeded
    }

    /// Pan the view right by `amount` true-space units.
    pub fn pan_right(&mut self, amount: f64) -> Action {
        self.camera.apply_pan(amount, 0.0);
        Action::RenderNeeded
    }

    /// Pan the view up by `amount` true-space units.
    pub fn pan_up(&mut self, amount: f64) -> Action {
        self.camera.apply_pan(0.0, -amount);
        Action::RenderNeeded
    }

    /// Pan the view down by `amount` true-space units.
    pub fn pan_down(&mut self, amount: f64) -> Action {
        self.camera.apply_pan(0.0, amount);
        Action::RenderNeeded
    }

    // --- Queries ---

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }
}

/// The drawing surface: the canvas element and its 2D context.
///
/// Present only when initialization succeeded; an engine without a surface
/// stays inert (state updates still apply, drawing is skipped).
struct Surface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl Surface {
    /// Acquire the 2D context from `canvas`.
    ///
    /// Logs a diagnostic and returns `None` when the context is unavailable.
    fn from_canvas(canvas: HtmlCanvasElement) -> Option<Self> {
        match canvas.get_context("2d") {
            Ok(Some(object)) => match object.dyn_into::<CanvasRenderingContext2d>() {
                Ok(context) => Some(Self { canvas, context }),
                Err(object) => {
                    log::error!("canvas 2d context has unexpected type {object:?}; rendering disabled");
                    None
                }
            },
            Ok(None) => {
                log::error!("canvas element is missing a 2d context; rendering disabled");
                None
            }
            Err(err) => {
                log::error!("failed to acquire 2d context: {err:?}; rendering disabled");
                None
            }
        }
    }
}

/// The full grid engine. Wraps `EngineCore` and owns the browser canvas
/// element, redrawing whenever a handler reports [`Action::RenderNeeded`].
pub struct Engine {
    surface: Option<Surface>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element, if any, and
    /// draw the initial grid.
    ///
    /// A missing canvas or 2D context is logged and leaves the engine inert
    /// rather than failing construction.
    #[must_use]
    pub fn new(canvas: Option<HtmlCanvasElement>, config: GridConfig) -> Self {
        let surface = match canvas {
            Some(canvas) => Surface::from_canvas(canvas),
            None => {
                log::error!("no canvas element supplied; rendering disabled");
                None
            }
        };

        let mut core = EngineCore::new(config);
        if let Some(surface) = &surface {
            core.set_viewport(
                f64::from(surface.canvas.client_width()),
                f64::from(surface.canvas.client_height()),
            );
        }

        let engine = Self { surface, core };
        engine.render();
        engine
    }

    // --- Delegated gesture events ---

    pub fn on_contact_start(&mut self, contacts: &[Point]) {
        let action = self.core.on_contact_start(contacts);
        self.react(action);
    }

    pub fn on_contact_move(&mut self, contacts: &[Point]) {
        let action = self.core.on_contact_move(contacts);
        self.react(action);
    }

    pub fn on_contact_end(&mut self, contacts: &[Point]) {
        let action = self.core.on_contact_end(contacts);
        self.react(action);
    }

    // --- Viewport ---

    /// The host viewport changed; re-measure the canvas and redraw.
    pub fn on_surface_resize(&mut self) {
        let Some(surface) = &self.surface else {
            return;
        };
        let action = self.core.on_surface_resize(
            f64::from(surface.canvas.client_width()),
            f64::from(surface.canvas.client_height()),
        );
        self.react(action);
    }

    // --- Chrome buttons ---

    /// Zoom-in button: one [`BUTTON_ZOOM_IN`] step.
    pub fn zoom_in(&mut self) {
        let action = self.core.zoom_in(BUTTON_ZOOM_IN);
        self.react(action);
    }

    /// Zoom-out button: one [`BUTTON_ZOOM_OUT`] step.
    pub fn zoom_out(&mut self) {
        let action = self.core.zoom_out(BUTTON_ZOOM_OUT);
        self.react(action);
    }

    /// Pan-left button; chrome passes [`crate::consts::BUTTON_PAN_STEP`].
    pub fn pan_left(&mut self, amount: f64) {
        let action = self.core.pan_left(amount);
        self.react(action);
    }

    /// Pan-right button; chrome passes [`crate::consts::BUTTON_PAN_STEP`].
    pub fn pan_right(&mut self, amount: f64) {
        let action = self.core.pan_right(amount);
        self.react(action);
    }

    /// Pan-up button; chrome passes [`crate::consts::BUTTON_PAN_STEP`].
    pub fn pan_up(&mut self, amount: f64) {
        let action = self.core.pan_up(amount);
        self.react(action);
    }

    /// Pan-down button; chrome passes [`crate::consts::BUTTON_PAN_STEP`].
    pub fn pan_down(&mut self, amount: f64) {
        let action = self.core.pan_down(amount);
        self.react(action);
    }

    // --- Render ---

    /// Redraw the grid. A missing surface makes this a no-op.
    pub fn render(&self) {
        let Some(surface) = &self.surface else {
            return;
        };
        if let Err(err) = render::draw(
            &surface.canvas,
            &surface.context,
            &self.core.camera,
            self.core.config.cell_size,
            self.core.viewport_width,
            self.core.viewport_height,
        ) {
            log::error!("grid draw failed: {err:?}");
        }
    }

    fn react(&self, action: Action) {
        if action == Action::RenderNeeded {
            self.render();
        }
    }

    // --- Delegated queries ---

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }
}
