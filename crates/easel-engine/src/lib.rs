//! Easel engine crate.
//!
//! Platform, timing and draw-stream pieces the UI layer builds on. Nothing in
//! here knows about buttons or simulations; it turns window events into
//! `input::InputEvent`s and a recorded `scene::DrawList` into pixels.

pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod platform;
pub mod render;
pub mod scene;
pub mod text;
pub mod time;
