//! Infinite grid canvas engine: pan/zoom camera, touch gestures, grid drawing.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the grid view: translating raw contact samples and button
//! commands into camera mutations, laying out the visible grid lines with
//! their coordinate labels, and drawing them to the canvas. The host layer is
//! responsible only for wiring DOM events and chrome buttons to the
//! [`engine::Engine`] API and for installing a `log` backend.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Contact samples and the gesture state machine |
//! | [`render`] | Grid line layout and canvas drawing |
//! | [`consts`] | Shared numeric constants (cell size, button magnitudes, styles) |

pub mod camera;
pub mod consts;
pub mod engine;
pub mod input;
pub mod render;
