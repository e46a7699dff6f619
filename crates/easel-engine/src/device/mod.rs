//! GPU device + presentation.
//!
//! The canvas is rendered on the CPU; this module only owns the wgpu
//! device/surface and copies finished canvases to the window.

mod gpu;
mod presenter;

pub use gpu::{Gpu, GpuInit, SurfaceErrorAction};
pub use presenter::Presenter;
